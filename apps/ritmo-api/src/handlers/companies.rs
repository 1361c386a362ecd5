//! Company API handlers
//!
//! `GET /companies/{id}`, `POST /companies`, `PUT /companies/{id}`.

use axum::extract::{Path, State};
use axum::Json;
use ritmo_core::validation::validate_company_fields;
use ritmo_core::{Company, CompanyFields, CoreError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

/// Company as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub id: String,
    pub name: String,
    pub fiscal_id: String,
    pub address: String,
    pub address_line_two: String,
    pub region: String,
    pub city: String,
}

impl From<Company> for CompanyView {
    fn from(company: Company) -> Self {
        CompanyView {
            id: company.id,
            name: company.name,
            fiscal_id: company.fiscal_id,
            address: company.address,
            address_line_two: company.address_line_two,
            region: company.region,
            city: company.city,
        }
    }
}

/// Body of `POST /companies` and `PUT /companies/{id}`.
///
/// Every field is replaced on update; omitted optional fields become empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    pub name: String,
    pub fiscal_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub address_line_two: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
}

impl CompanyRequest {
    fn into_fields(self) -> Result<CompanyFields, ApiError> {
        let fields = CompanyFields {
            name: self.name,
            fiscal_id: self.fiscal_id,
            address: self.address,
            address_line_two: self.address_line_two,
            region: self.region,
            city: self.city,
        };
        validate_company_fields(&fields).map_err(CoreError::from)?;
        Ok(fields)
    }
}

/// GET /companies/{id} - Get a company
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompanyView>, ApiError> {
    let company = state
        .store
        .companies()
        .get_by_id(&id)
        .await
        .ok_or_else(|| ApiError::not_found("company", &id))?;

    Ok(Json(company.into()))
}

/// POST /companies - Create a company
pub async fn create_company(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompanyRequest>,
) -> Result<Json<CompanyView>, ApiError> {
    let fields = request.into_fields()?;
    let company = state.store.companies().create(fields).await?;

    info!(id = %company.id, name = %company.name, "Company created");
    Ok(Json(company.into()))
}

/// PUT /companies/{id} - Replace a company's fields
///
/// An unknown company is reported before the body is looked at.
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ApiJson<CompanyRequest>, ApiError>,
) -> Result<Json<CompanyView>, ApiError> {
    if state.store.companies().get_by_id(&id).await.is_none() {
        return Err(ApiError::not_found("company", &id));
    }

    let ApiJson(request) = body?;
    let fields = request.into_fields()?;
    let company = state.store.companies().update(&id, fields).await?;

    info!(id = %company.id, "Company updated");
    Ok(Json(company.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::test_state;

    fn acme() -> CompanyRequest {
        CompanyRequest {
            name: "Acme".to_string(),
            fiscal_id: "B12345678".to_string(),
            city: "Madrid".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_dir, state) = test_state().await;

        let Json(created) = create_company(State(state.clone()), ApiJson(acme()))
            .await
            .unwrap();
        assert_eq!(created.name, "Acme");
        assert!(!created.id.is_empty());

        let Json(fetched) = get_company(State(state), Path(created.id.clone()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_company() {
        let (_dir, state) = test_state().await;

        let err = get_company(State(state), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "error: company not found: nope");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (_dir, state) = test_state().await;
        let request = CompanyRequest {
            name: "  ".to_string(),
            ..acme()
        };

        let err = create_company(State(state.clone()), ApiJson(request))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.store.companies().count().await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (_dir, state) = test_state().await;
        let Json(created) = create_company(State(state.clone()), ApiJson(acme()))
            .await
            .unwrap();

        let request = CompanyRequest {
            name: "Acme Ltd".to_string(),
            fiscal_id: "B12345678".to_string(),
            ..Default::default()
        };
        let Json(updated) =
            update_company(State(state), Path(created.id.clone()), Ok(ApiJson(request)))
                .await
                .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Acme Ltd");
        assert_eq!(updated.city, "");
    }

    #[tokio::test]
    async fn test_update_unknown_company() {
        let (_dir, state) = test_state().await;

        let err = update_company(State(state), Path("nope".to_string()), Ok(ApiJson(acme())))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_unknown_company_wins_over_bad_body() {
        let (_dir, state) = test_state().await;

        let err = update_company(
            State(state),
            Path("nope".to_string()),
            Err(ApiError::bad_request("missing field `name`")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
