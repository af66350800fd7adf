//! Date-of-birth visibility policy.
//!
//! Month and year of birth are always public. The day is shown only when the
//! caller asked for register view and the company keeps its PSC register on
//! the public register, and the record did not cease before the register
//! moved there. Every ineligible case is `NotFound`, including missing or
//! malformed metrics.

use tracing::debug;

use crate::error::PscError;
use crate::models::{CompanyMetrics, PscDocument};
use crate::ports::{MetricsProvider, Result};

/// Whether the day component of `document`'s date of birth may be shown.
pub async fn may_show_dob_day(
    metrics: &dyn MetricsProvider,
    document: &PscDocument,
    register_view: bool,
) -> Result<bool> {
    if !register_view {
        return Ok(false);
    }

    let company_metrics = metrics
        .get_metrics(&document.company_number)
        .await?
        .ok_or_else(|| {
            PscError::not_found(format!(
                "no company metrics for {}",
                document.company_number
            ))
        })?;

    let show = register_view_eligible(&company_metrics, document)?;
    debug!(
        company_number = %document.company_number,
        notification_id = %document.id,
        show_day = show,
        "register view date-of-birth decision"
    );
    Ok(show)
}

/// Register-view decision once metrics are in hand.
pub fn register_view_eligible(metrics: &CompanyMetrics, document: &PscDocument) -> Result<bool> {
    if !metrics.is_on_public_register() {
        return Err(PscError::not_found(format!(
            "PSC register for {} is not on the public register",
            document.company_number
        )));
    }

    if !document.ceased() {
        return Ok(true);
    }

    let ceased_on = document.ceased_on().ok_or_else(|| {
        PscError::not_found(format!("ceased record {} has no ceased_on date", document.id))
    })?;
    let moved_on = metrics.register_moved_on().ok_or_else(|| {
        PscError::not_found(format!(
            "no register moved_on date for {}",
            document.company_number
        ))
    })?;

    if moved_on < ceased_on {
        Ok(true)
    } else {
        Err(PscError::not_found(format!(
            "record {} ceased before the register moved to the public register",
            document.id
        )))
    }
}
