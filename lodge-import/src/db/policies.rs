//! Booking terms persistence: booking settings, special offers,
//! rules and policies, payment methods

use lodge_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{BookingSettingsInput, PaymentMethodInput, RulesAndPolicyInput, SpecialOfferInput};
use crate::store::PropertyScope;

/// Insert the property's booking settings (UNIQUE per property)
pub async fn insert_booking_settings(
    pool: &SqlitePool,
    scope: &PropertyScope,
    settings: &BookingSettingsInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO booking_settings (
            id, property_id, tenant_id, check_in_time, check_out_time, min_stay_nights,
            max_stay_nights, advance_booking_days, free_cancellation_days, partial_refund_days,
            partial_refund_percent, deposit_required, deposit_percent, instant_booking
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&settings.check_in_time)
    .bind(&settings.check_out_time)
    .bind(settings.min_stay_nights)
    .bind(settings.max_stay_nights)
    .bind(settings.advance_booking_days)
    .bind(settings.free_cancellation_days)
    .bind(settings.partial_refund_days)
    .bind(settings.partial_refund_percent)
    .bind(settings.deposit_required.unwrap_or(false))
    .bind(settings.deposit_percent)
    .bind(settings.instant_booking.unwrap_or(false))
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_special_offer(
    pool: &SqlitePool,
    scope: &PropertyScope,
    offer: &SpecialOfferInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO special_offers (
            id, property_id, tenant_id, title, description, discount_percent, promo_code,
            valid_from, valid_to, is_active
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&offer.title)
    .bind(&offer.description)
    .bind(offer.discount_percent)
    .bind(&offer.promo_code)
    .bind(offer.valid_from)
    .bind(offer.valid_to)
    .bind(offer.is_active.unwrap_or(true))
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_rules_and_policy(
    pool: &SqlitePool,
    scope: &PropertyScope,
    rule: &RulesAndPolicyInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO rules_and_policies (id, property_id, tenant_id, title, description, category) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&rule.title)
    .bind(&rule.description)
    .bind(&rule.category)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_payment_method(
    pool: &SqlitePool,
    scope: &PropertyScope,
    method: &PaymentMethodInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO payment_methods (id, property_id, tenant_id, method_name, description) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&method.method_name)
    .bind(&method.description)
    .execute(pool)
    .await?;

    Ok(id)
}
