use serde::Deserialize;
use validator::Validate;

use crate::domain::types::TrainerId;
use crate::dto::search::SearchParams;
use crate::forms::{FormError, lenient_number};

/// Longest search term or specialty filter accepted.
pub const MAX_FILTER_LEN: u64 = 200;

#[derive(Debug, Deserialize, Validate)]
/// Form data posted by the search box.
pub struct SearchForm {
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    #[validate(length(max = MAX_FILTER_LEN))]
    pub search_term: String,
    #[serde(default)]
    #[validate(length(max = MAX_FILTER_LEN))]
    pub specialty_filter: String,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl From<SearchForm> for SearchParams {
    fn from(form: SearchForm) -> Self {
        SearchParams {
            search_term: form.search_term,
            specialty_filter: form.specialty_filter,
            page: lenient_number(form.page.as_deref()),
            per_page: lenient_number(form.per_page.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
/// Form data posted when listing every trainer.
pub struct ListForm {
    #[serde(default)]
    pub nonce: String,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListForm {
    pub fn page(&self) -> Option<i64> {
        lenient_number(self.page.as_deref())
    }

    pub fn per_page(&self) -> Option<i64> {
        lenient_number(self.per_page.as_deref())
    }
}

#[derive(Debug, Deserialize)]
/// Form data posted when opening a trainer profile.
///
/// The id stays raw text until the token has been checked.
pub struct ProfileForm {
    #[serde(default)]
    pub nonce: String,
    pub trainer_id: Option<String>,
}

impl ProfileForm {
    /// Parses the requested id; it must be a positive 32-bit integer.
    pub fn trainer_id(&self) -> Result<TrainerId, FormError> {
        self.trainer_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .and_then(|id| TrainerId::new(id).ok())
            .ok_or(FormError::InvalidField("trainer_id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_form_is_lenient_about_paging() {
        let form = SearchForm {
            nonce: "n".to_string(),
            search_term: "docker".to_string(),
            specialty_filter: String::new(),
            page: Some(String::new()),
            per_page: Some("24".to_string()),
        };
        assert!(form.validate().is_ok());

        let params = SearchParams::from(form);
        assert_eq!(params.page, None);
        assert_eq!(params.per_page, Some(24));
    }

    #[test]
    fn overlong_terms_are_rejected() {
        let form = SearchForm {
            nonce: "n".to_string(),
            search_term: "a".repeat(MAX_FILTER_LEN as usize + 1),
            specialty_filter: String::new(),
            page: None,
            per_page: None,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn profile_id_must_be_positive() {
        let form = |raw: Option<&str>| ProfileForm {
            nonce: "n".to_string(),
            trainer_id: raw.map(str::to_string),
        };
        assert_eq!(form(Some(" 7 ")).trainer_id().ok(), TrainerId::new(7).ok());
        assert!(form(Some("0")).trainer_id().is_err());
        assert!(form(Some("abc")).trainer_id().is_err());
        assert!(form(Some("2147483648")).trainer_id().is_err());
        assert!(form(None).trainer_id().is_err());
    }

    #[test]
    fn missing_nonce_deserializes_as_empty() {
        let form: ListForm = serde_json::from_str(r#"{"page": "2"}"#).unwrap();
        assert!(form.nonce.is_empty());
        assert_eq!(form.page(), Some(2));
    }
}
