use chrono::NaiveDate;
use contracts::domain::a003_service::aggregate::Service;
use contracts::domain::common::EntityId;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Поля формы "Add New Service" как их ввёл пользователь
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub price: String,
    pub last_updated: String,
}

impl ServiceForm {
    /// Пустая форма с сегодняшней датой
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            last_updated: today.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn validate(&self, id: EntityId) -> Result<Service, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Service name is required".to_string());
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| "Price must be a non-negative number".to_string())?;
        let last_updated = self.last_updated.trim();
        if NaiveDate::parse_from_str(last_updated, DATE_FORMAT).is_err() {
            return Err("Last updated must be a date".to_string());
        }
        Ok(Service {
            id,
            name: name.to_string(),
            price,
            last_updated: Some(last_updated.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_new_form_defaults_to_today() {
        assert_eq!(ServiceForm::new(today()).last_updated, "2024-03-15");
    }

    #[test]
    fn test_validate_name_and_price() {
        let mut form = ServiceForm::new(today());
        assert_eq!(form.validate(EntityId::Int(5)).unwrap_err(), "Service name is required");

        form.name = "  Steam Press ".to_string();
        form.price = "-1".to_string();
        assert_eq!(
            form.validate(EntityId::Int(5)).unwrap_err(),
            "Price must be a non-negative number"
        );
        form.price = "abc".to_string();
        assert!(form.validate(EntityId::Int(5)).is_err());

        form.price = "3.5".to_string();
        let service = form.validate(EntityId::Int(5)).unwrap();
        assert_eq!(service.name, "Steam Press");
        assert_eq!(service.price, 3.5);
        assert_eq!(service.last_updated.as_deref(), Some("2024-03-15"));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let form = ServiceForm {
            name: "Pickup".to_string(),
            price: "0".to_string(),
            last_updated: "2024-01-02".to_string(),
        };
        assert_eq!(form.validate(EntityId::Int(1)).unwrap().price, 0.0);
    }
}
