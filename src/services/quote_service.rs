use std::collections::BTreeMap;

use chrono::{Duration, Utc};

use crate::{
    audit,
    dto::quote::{QuoteRequest, QuoteSubmitted},
    error::{AppError, AppResult},
    money::{format_kina, group_digits},
    notifications::{NotificationRequest, Priority},
    pricing::{self, PriceBreakdown},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Price a configuration without submitting it. Incomplete configurations
/// price to zero; nothing here is an error.
pub fn price(payload: &QuoteRequest) -> ApiResponse<PriceBreakdown> {
    let breakdown = pricing::price_quote(
        &payload.tank_type,
        payload.capacity,
        &payload.color,
        &payload.accessories,
        payload.quantity,
        &payload.delivery_province,
    );
    ApiResponse::success("Quote price", breakdown, Some(Meta::empty()))
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Submit a quote request: validate the form, compute the price, hand the
/// customer a 30-day reference and send the quote-ready email. Delivery
/// failure is logged and never fails the submission.
pub async fn submit(
    state: &AppState,
    payload: QuoteRequest,
) -> AppResult<ApiResponse<QuoteSubmitted>> {
    require(&payload.tank_type, "tank_type")?;
    require(&payload.delivery_province, "delivery_province")?;
    require(&payload.customer.name, "customer.name")?;
    require(&payload.customer.email, "customer.email")?;
    require(&payload.customer.phone, "customer.phone")?;
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    // One in-flight submission per customer address.
    let _token = state
        .submissions
        .acquire(format!("quote:{}", payload.customer.email.to_lowercase()))
        .ok_or(AppError::SubmissionInProgress)?;

    let breakdown = pricing::price_quote(
        &payload.tank_type,
        payload.capacity,
        &payload.color,
        &payload.accessories,
        payload.quantity,
        &payload.delivery_province,
    );

    let now = Utc::now();
    let millis = now.timestamp_millis().to_string();
    let quote_number = format!("ATL-{}", &millis[millis.len() - 6..]);
    let valid_until = now + Duration::days(pricing::QUOTE_VALIDITY_DAYS);

    let variables: BTreeMap<String, String> = [
        ("customerName".to_string(), payload.customer.name.clone()),
        ("quoteNumber".to_string(), quote_number.clone()),
        ("quoteDate".to_string(), now.format("%d/%m/%Y").to_string()),
        (
            "expiryDate".to_string(),
            valid_until.format("%d/%m/%Y").to_string(),
        ),
        (
            "quoteTotal".to_string(),
            group_digits(breakdown.total.unsigned_abs()),
        ),
    ]
    .into();

    if let Err(err) = state.mailer.send(NotificationRequest {
        to: payload.customer.email.clone(),
        template_id: "quote-ready".to_string(),
        variables,
        priority: Priority::Normal,
    }) {
        tracing::warn!(error = %err, quote_number = %quote_number, "quote-ready email failed");
    }

    audit::record(
        None,
        "quote_submitted",
        Some("quotes"),
        Some(serde_json::json!({
            "quote_number": quote_number,
            "email": payload.customer.email,
            "total": breakdown.total,
        })),
    );

    let submitted = QuoteSubmitted {
        quote_number,
        total: breakdown.total,
        total_display: format_kina(breakdown.total),
        valid_until,
    };
    Ok(ApiResponse::success(
        "Quote submitted",
        submitted,
        Some(Meta::empty()),
    ))
}
