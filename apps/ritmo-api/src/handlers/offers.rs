//! Offer API handlers
//!
//! Contains HTTP request handlers for offer lookup, creation and the two
//! field-level updates (status, accepted).

use axum::extract::{Path, State};
use axum::Json;
use ritmo_core::validation::{parse_amount, parse_status_update};
use ritmo_core::{CoreError, CurrencyProfile, NewOffer, Offer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

/// Offer as returned to clients.
///
/// Amounts are rendered in the configured display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    pub id: String,
    pub company_id: String,
    pub status: String,
    pub charges: i64,
    pub sales_percentage: i64,
    pub accepted: bool,
    pub advance: String,
    pub refund: String,
}

impl OfferView {
    /// Builds the view, failing when a stored amount is unreadable.
    pub fn render(offer: Offer, currency: &CurrencyProfile) -> Result<Self, CoreError> {
        let advance = offer
            .advance()
            .map_err(|e| CoreError::amount("advance", e))?;
        let refund = offer.refund().map_err(|e| CoreError::amount("refund", e))?;

        Ok(OfferView {
            id: offer.id,
            company_id: offer.company_id,
            status: offer.status.to_string(),
            charges: offer.charges,
            sales_percentage: offer.sales_percentage,
            accepted: offer.accepted,
            advance: advance.format_currency(currency),
            refund: refund.format_currency(currency),
        })
    }
}

/// Body of `POST /offers`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub company_id: String,
    pub charges: i64,
    pub sales_percentage: i64,
    pub advance: String,
    pub refund: String,
}

/// Body of `PUT /offers/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Body of `PUT /offers/{id}/accepted`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAcceptedRequest {
    pub accepted: bool,
}

fn respond(state: &AppState, offer: Offer) -> Result<Json<OfferView>, ApiError> {
    Ok(Json(OfferView::render(offer, &state.currency)?))
}

async fn find_offer(state: &AppState, id: &str) -> Result<Offer, ApiError> {
    state
        .store
        .offers()
        .get_by_id(id)
        .await
        .ok_or_else(|| ApiError::not_found("offer", id))
}

/// Fails on unreadable stored amounts before anything is written.
///
/// Status and accepted updates leave the amounts alone, so an offer that
/// renders now still renders after the write.
fn ensure_renderable(state: &AppState, offer: Offer) -> Result<(), ApiError> {
    OfferView::render(offer, &state.currency)?;
    Ok(())
}

/// GET /offers/{id} - Get an offer
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferView>, ApiError> {
    let offer = find_offer(&state, &id).await?;
    respond(&state, offer)
}

/// GET /offers-company/{company_id} - Get the offer of a company
pub async fn get_offer_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<OfferView>, ApiError> {
    let offer = state
        .store
        .offers()
        .get_by_company(&company_id)
        .await
        .ok_or_else(|| ApiError::not_found("offer for company", &company_id))?;

    respond(&state, offer)
}

/// POST /offers - Create an offer
///
/// ## Check Order
/// 1. Unknown company → 404 (amounts are not looked at)
/// 2. Malformed advance or refund → 500
/// 3. Company already has an offer → 409
pub async fn create_offer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOfferRequest>,
) -> Result<Json<OfferView>, ApiError> {
    if state
        .store
        .companies()
        .get_by_id(&request.company_id)
        .await
        .is_none()
    {
        return Err(ApiError::not_found("company", &request.company_id));
    }

    let new_offer = NewOffer {
        advance: parse_amount("advance", &request.advance)?,
        refund: parse_amount("refund", &request.refund)?,
        company_id: request.company_id,
        charges: request.charges,
        sales_percentage: request.sales_percentage,
    };

    // The repository re-checks the company inside its own lock.
    let offer = state.store.offers().create(new_offer).await?;
    respond(&state, offer)
}

/// PUT /offers/{id}/status - Move an offer to a new status
///
/// ## Check Order
/// 1. Unknown offer → 404 (the body is not looked at)
/// 2. Malformed body, unknown or non-settable status → 400
/// 3. Unreadable stored amount → 500, nothing written
pub async fn update_offer_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ApiJson<UpdateStatusRequest>, ApiError>,
) -> Result<Json<OfferView>, ApiError> {
    let existing = find_offer(&state, &id).await?;

    let ApiJson(request) = body?;
    let status = parse_status_update(&request.status)?;
    ensure_renderable(&state, existing)?;
    let offer = state.store.offers().update_status(&id, status).await?;

    info!(id = %id, status = %status, "Offer status updated");
    respond(&state, offer)
}

/// PUT /offers/{id}/accepted - Record the company's answer
pub async fn update_offer_accepted(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ApiJson<UpdateAcceptedRequest>, ApiError>,
) -> Result<Json<OfferView>, ApiError> {
    let existing = find_offer(&state, &id).await?;

    let ApiJson(request) = body?;
    ensure_renderable(&state, existing)?;
    let offer = state
        .store
        .offers()
        .set_accepted(&id, request.accepted)
        .await?;

    respond(&state, offer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{test_state, test_state_with_company};
    use ritmo_core::OfferStatus;

    fn create_request(company_id: &str) -> CreateOfferRequest {
        CreateOfferRequest {
            company_id: company_id.to_string(),
            charges: 3,
            sales_percentage: 10,
            advance: "100.00".to_string(),
            refund: "0.00".to_string(),
        }
    }

    #[test]
    fn test_render_formats_amounts() {
        let offer = Offer {
            id: "o1".into(),
            company_id: "c1".into(),
            raw_advance: "1234.50".into(),
            raw_refund: String::new(),
            ..Default::default()
        };

        let view = OfferView::render(offer.clone(), &CurrencyProfile::EUR).unwrap();
        assert_eq!(view.advance, "1.234,50 €");
        assert_eq!(view.refund, "0,00 €");
        assert_eq!(view.status, "STATUS_PENDING");

        let view = OfferView::render(offer, &CurrencyProfile::USD).unwrap();
        assert_eq!(view.advance, "$1,234.50");
    }

    #[test]
    fn test_render_rejects_corrupt_amount() {
        let offer = Offer {
            raw_advance: "lots".into(),
            ..Default::default()
        };
        assert!(matches!(
            OfferView::render(offer, &CurrencyProfile::EUR),
            Err(CoreError::Amount { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_offer() {
        let (_dir, state, company_id) = test_state_with_company().await;

        let Json(view) = create_offer(State(state), ApiJson(create_request(&company_id)))
            .await
            .unwrap();

        assert_eq!(view.company_id, company_id);
        assert_eq!(view.status, "STATUS_PENDING");
        assert_eq!(view.advance, "100,00 €");
        assert!(!view.accepted);
    }

    #[tokio::test]
    async fn test_create_offer_unknown_company_wins_over_bad_amount() {
        let (_dir, state) = test_state().await;
        let mut request = create_request("ghost");
        request.advance = "not money".to_string();

        let err = create_offer(State(state.clone()), ApiJson(request))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(state.store.offers().count().await, 0);
    }

    #[tokio::test]
    async fn test_create_offer_bad_amount_is_server_error() {
        let (_dir, state, company_id) = test_state_with_company().await;
        let mut request = create_request(&company_id);
        request.refund = "ten".to_string();

        let err = create_offer(State(state.clone()), ApiJson(request))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AmountFormat);
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.store.offers().count().await, 0);
    }

    #[tokio::test]
    async fn test_second_offer_conflicts() {
        let (_dir, state, company_id) = test_state_with_company().await;

        create_offer(State(state.clone()), ApiJson(create_request(&company_id)))
            .await
            .unwrap();
        let err = create_offer(State(state), ApiJson(create_request(&company_id)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_update_status() {
        let (_dir, state, company_id) = test_state_with_company().await;
        let Json(created) = create_offer(State(state.clone()), ApiJson(create_request(&company_id)))
            .await
            .unwrap();

        let Json(updated) = update_offer_status(
            State(state.clone()),
            Path(created.id.clone()),
            Ok(ApiJson(UpdateStatusRequest {
                status: "STATUS_PREAPROVED".to_string(),
            })),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, OfferStatus::PreApproved.as_str());

        let err = update_offer_status(
            State(state.clone()),
            Path(created.id.clone()),
            Ok(ApiJson(UpdateStatusRequest {
                status: "STATUS_PENDING".to_string(),
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatus);

        let stored = state.store.offers().get_by_id(&created.id).await.unwrap();
        assert_eq!(stored.status, OfferStatus::PreApproved);
    }

    #[tokio::test]
    async fn test_update_status_unknown_offer() {
        let (_dir, state) = test_state().await;

        let err = update_offer_status(
            State(state),
            Path("nope".to_string()),
            Ok(ApiJson(UpdateStatusRequest {
                status: "garbage".to_string(),
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_unknown_offer_wins_over_bad_body() {
        let (_dir, state) = test_state().await;

        let err = update_offer_status(
            State(state.clone()),
            Path("ghost".to_string()),
            Err(ApiError::bad_request("missing field `status`")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = update_offer_accepted(
            State(state),
            Path("ghost".to_string()),
            Err(ApiError::bad_request("missing field `accepted`")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_unreadable_amount_blocks_updates() {
        let (_dir, state, company_id) = test_state_with_company().await;
        state
            .store
            .offers()
            .upsert(Offer {
                id: "legacy".into(),
                company_id,
                raw_advance: "lots".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = update_offer_accepted(
            State(state.clone()),
            Path("legacy".to_string()),
            Ok(ApiJson(UpdateAcceptedRequest { accepted: true })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::AmountFormat);

        let err = update_offer_status(
            State(state.clone()),
            Path("legacy".to_string()),
            Ok(ApiJson(UpdateStatusRequest {
                status: "STATUS_REJECTED".to_string(),
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::AmountFormat);

        let stored = state.store.offers().get_by_id("legacy").await.unwrap();
        assert!(!stored.accepted);
        assert_eq!(stored.status, OfferStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_accepted() {
        let (_dir, state, company_id) = test_state_with_company().await;
        let Json(created) = create_offer(State(state.clone()), ApiJson(create_request(&company_id)))
            .await
            .unwrap();

        let Json(updated) = update_offer_accepted(
            State(state.clone()),
            Path(created.id.clone()),
            Ok(ApiJson(UpdateAcceptedRequest { accepted: true })),
        )
        .await
        .unwrap();
        assert!(updated.accepted);

        let err = update_offer_accepted(
            State(state),
            Path("nope".to_string()),
            Ok(ApiJson(UpdateAcceptedRequest { accepted: true })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_offer_by_company() {
        let (_dir, state, company_id) = test_state_with_company().await;

        let err = get_offer_by_company(State(state.clone()), Path(company_id.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let Json(created) = create_offer(State(state.clone()), ApiJson(create_request(&company_id)))
            .await
            .unwrap();
        let Json(by_company) = get_offer_by_company(State(state.clone()), Path(company_id))
            .await
            .unwrap();
        let Json(by_id) = get_offer(State(state), Path(created.id.clone())).await.unwrap();

        assert_eq!(by_company, created);
        assert_eq!(by_id, created);
    }
}
