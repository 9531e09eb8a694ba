// Presentation models: serializable view structures derived from parsed
// evaluations and the current selection. Nothing here performs I/O.

pub mod cards;
pub mod debate;
pub mod view;

use crate::backend_client::models::EntityDetail;

pub const FALLBACK_APPLICANT_NAME: &str = "Applicant";

/// Title-cases each space-separated word: "ADA lovelace" -> "Ada Lovelace".
pub fn format_name(name: &str) -> String {
    name.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn applicant_display_name(detail: Option<&EntityDetail>) -> String {
    detail
        .and_then(EntityDetail::name)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(format_name)
        .unwrap_or_else(|| FALLBACK_APPLICANT_NAME.to_string())
}
