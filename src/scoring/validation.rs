use super::config::Weights;

/// Validate weights at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &Weights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let all = [
        ("employee_min", weights.employee_min),
        ("employee_max", weights.employee_max),
        ("rev_min", weights.rev_min),
        ("rev_max", weights.rev_max),
        ("w_employee_fit", weights.w_employee_fit),
        ("w_revenue_fit", weights.w_revenue_fit),
        ("w_industry_match", weights.w_industry_match),
        ("w_location_match", weights.w_location_match),
        ("w_contact_completeness", weights.w_contact_completeness),
        ("w_growth_signal", weights.w_growth_signal),
        ("hot_threshold", weights.hot_threshold),
        ("warm_threshold", weights.warm_threshold),
    ];

    for (key, value) in all {
        if !value.is_finite() {
            errors.push(format!("weights.{}: must be a finite number", key));
        } else if value < 0.0 {
            errors.push(format!("weights.{}: must be non-negative", key));
        }
    }

    if weights.employee_min > weights.employee_max {
        errors.push(format!(
            "weights.employee_min: {} is above employee_max {}",
            weights.employee_min, weights.employee_max
        ));
    }

    if weights.rev_min > weights.rev_max {
        errors.push(format!(
            "weights.rev_min: {} is above rev_max {}",
            weights.rev_min, weights.rev_max
        ));
    }

    for (key, value) in [
        ("hot_threshold", weights.hot_threshold),
        ("warm_threshold", weights.warm_threshold),
    ] {
        if value > 100.0 {
            errors.push(format!("weights.{}: must be at most 100", key));
        }
    }

    if weights.warm_threshold > weights.hot_threshold {
        errors.push(format!(
            "weights.warm_threshold: {} is above hot_threshold {}",
            weights.warm_threshold, weights.hot_threshold
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
