//! Read-only recap shown on the last step of the registration form.

use serde::{Deserialize, Serialize};

use crate::client::draft::RegistrationDraft;
use crate::domain::document::{DocumentMeta, format_file_size};
use crate::domain::trainer::TAG_DELIMITER;
use crate::domain::types::Availability;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

fn push(items: &mut Vec<SummaryItem>, label: &str, value: impl Into<String>) {
    let value = value.into();
    let value = value.trim();
    if !value.is_empty() {
        items.push(SummaryItem {
            label: label.to_string(),
            value: value.to_string(),
        });
    }
}

fn describe_file(meta: &DocumentMeta) -> String {
    format!("{} ({})", meta.file_name, format_file_size(meta.size))
}

/// Lists the entered values in display order; empty values are skipped.
pub fn build_summary(draft: &RegistrationDraft) -> Vec<SummaryItem> {
    let mut items = Vec::new();

    push(
        &mut items,
        "Nom complet",
        format!("{} {}", draft.first_name.trim(), draft.last_name.trim()),
    );
    push(&mut items, "Email", draft.email.as_str());
    push(&mut items, "Téléphone", draft.phone.as_str());
    push(&mut items, "Entreprise", draft.company.as_str());
    push(&mut items, "LinkedIn", draft.linkedin_url.as_str());
    push(&mut items, "Spécialités", draft.specialties.join(TAG_DELIMITER));
    push(
        &mut items,
        "Zones d'intervention",
        draft.intervention_regions.join(TAG_DELIMITER),
    );

    let availability = match Availability::parse_optional(&draft.availability) {
        Ok(Some(availability)) => availability.label().to_string(),
        Ok(None) => String::new(),
        Err(_) => draft.availability.clone(),
    };
    push(&mut items, "Disponibilité", availability);
    push(&mut items, "Tarif horaire", draft.hourly_rate.as_str());

    if let Some(cv) = &draft.cv_file {
        push(&mut items, "CV", describe_file(cv));
    }
    if let Some(photo) = &draft.photo_file {
        push(&mut items, "Photo", describe_file(photo));
    }

    items
}
