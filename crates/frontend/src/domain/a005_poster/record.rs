use std::cmp::Ordering;

use contracts::domain::a005_poster::aggregate::Poster;
use contracts::domain::common::EntityId;

use crate::shared::list_view::{ListRecord, ListSchema};

/// Сетка 3 x 4
pub const POSTERS_PER_PAGE: usize = 12;

impl ListRecord for Poster {
    type Id = EntityId;

    fn record_id(&self) -> EntityId {
        self.id.clone()
    }
}

/// Постеры без поиска и фасетов
pub fn poster_schema() -> ListSchema<Poster> {
    ListSchema::new()
}

/// Новые сверху, постеры без даты в конце
pub fn newest_first(a: &Poster, b: &Poster) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poster(id: i64, created_at: Option<&str>) -> Poster {
        Poster {
            id: EntityId::Int(id),
            image_url: Some(format!("https://cdn.example.com/{}.jpg", id)),
            title: None,
            created_at: created_at.map(str::to_string),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut posters = vec![
            poster(1, Some("2024-01-10T09:00:00Z")),
            poster(2, None),
            poster(3, Some("2024-03-01T09:00:00Z")),
        ];
        posters.sort_by(newest_first);
        let ids: Vec<_> = posters.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![EntityId::Int(3), EntityId::Int(1), EntityId::Int(2)]);
    }

    #[test]
    fn test_image_url_aliases() {
        let poster: Poster =
            serde_json::from_str(r#"{ "id": 9, "imageUrl": "https://cdn.example.com/9.jpg" }"#).unwrap();
        assert_eq!(poster.image_url.as_deref(), Some("https://cdn.example.com/9.jpg"));
    }
}
