//! Offline backend for `--dry-run`.
//!
//! Logs what would be sent and answers with canned data. Nothing leaves the
//! machine.

use super::{ApiError, ApiResponse, Country, CreateSchoolResponse, SchoolApi, SchoolSummary, Subscription};
use crate::draft::{AdminDraft, SchoolDraft};
use crate::wizard_state::SchoolId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct DryRunApi {
    next_id: AtomicU64,
    created: Mutex<Vec<SchoolSummary>>,
}

impl DryRunApi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchoolApi for DryRunApi {
    fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        Ok(vec![
            Subscription {
                id: "dry-basic".to_string(),
                name: "Basic".to_string(),
                price: 0.0,
            },
            Subscription {
                id: "dry-premium".to_string(),
                name: "Premium".to_string(),
                price: 0.0,
            },
        ])
    }

    fn countries(&self) -> Result<Vec<Country>, ApiError> {
        Ok(vec![Country {
            id: "dry-country".to_string(),
            name: "Dry-run country".to_string(),
        }])
    }

    fn create_school(&self, school: &SchoolDraft) -> Result<CreateSchoolResponse, ApiError> {
        let id = format!("dry-run-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        info!("[DRY RUN] Would create school '{}' in {} -> {}", school.name, school.city, id);

        if let Ok(mut created) = self.created.lock() {
            created.push(SchoolSummary {
                id: id.clone(),
                name: school.name.clone(),
                city: school.city.clone(),
                email: school.email.clone(),
            });
        }

        Ok(CreateSchoolResponse {
            success: true,
            data: Some(serde_json::json!({ "id": id })),
            message: Some("dry run".to_string()),
        })
    }

    fn create_admin(
        &self,
        school_id: &SchoolId,
        admin: &AdminDraft,
    ) -> Result<ApiResponse, ApiError> {
        info!(
            "[DRY RUN] Would create administrator {} {} for school {}",
            admin.first_name, admin.last_name, school_id
        );
        Ok(ApiResponse {
            success: true,
            message: Some("dry run".to_string()),
        })
    }

    fn schools(&self) -> Result<Vec<SchoolSummary>, ApiError> {
        Ok(self
            .created
            .lock()
            .map(|created| created.clone())
            .unwrap_or_default())
    }
}
