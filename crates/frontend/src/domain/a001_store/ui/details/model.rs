use contracts::domain::a001_store::aggregate::{Store, StorePayload};

/// Поля формы точки как их ввёл пользователь
#[derive(Clone, Debug, PartialEq)]
pub struct StoreForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub password: String,
    pub is_active: bool,
}

impl Default for StoreForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            password: String::new(),
            is_active: true,
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

/// Пусто - координаты нет
fn parse_coordinate(value: &str, label: &str) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(format!("{} must be a number", label)),
    }
}

fn coordinate_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl StoreForm {
    pub fn from_store(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            email: store.email.clone().unwrap_or_default(),
            phone: store.phone.clone().unwrap_or_default(),
            address: store.address.clone().unwrap_or_default(),
            latitude: coordinate_text(store.latitude),
            longitude: coordinate_text(store.longitude),
            password: String::new(),
            is_active: store.is_active,
        }
    }

    /// Проверяет форму и собирает тело запроса. Пароль нужен только при создании.
    pub fn validate(&self, creating: bool) -> Result<StorePayload, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Store name is required".to_string());
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err("Enter a valid email address".to_string());
        }
        let latitude = parse_coordinate(&self.latitude, "Latitude")?;
        let longitude = parse_coordinate(&self.longitude, "Longitude")?;
        let password = if creating {
            if self.password.is_empty() {
                return Err("Password is required for a new store".to_string());
            }
            Some(self.password.clone())
        } else {
            None
        };

        Ok(StorePayload {
            name: name.to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            latitude,
            longitude,
            is_active: self.is_active,
            password,
        })
    }
}
