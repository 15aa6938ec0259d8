//! Closed-form expected score as a polars expression.
//!
//! Reads the three count columns and the four canonical auxiliary columns.
//! Branch order follows the published rule numbering; the mild-spectrum rules
//! are folded into two bands (`low`, `mid`) of general health and effort.

use cfs_model::Scale;
use cfs_model::catalog::{DAILY_EFFORT, GENERAL_HEALTH, PHYSICAL_ACTIVITY, TERMINALLY_ILL};
use cfs_model::columns::{BALDS_COUNT, DISEASES_COUNT, EXPECTED_CFS, IALDS_COUNT};
use polars::prelude::*;

fn int(name: &str) -> Expr {
    col(name).cast(DataType::Int64)
}

fn count(name: &str) -> Expr {
    int(name).fill_null(lit(0))
}

fn score(value: &str) -> Expr {
    lit(value.to_string())
}

/// Expression yielding the expected score as a nullable string column named
/// `expected_cfs`.
pub fn expected_score_expr(scale: Scale, min_comorbidities: u32) -> Expr {
    let b = count(BALDS_COUNT);
    let iadl = count(IALDS_COUNT);
    let d = count(DISEASES_COUNT);
    let gh = int(GENERAL_HEALTH);
    let e = int(DAILY_EFFORT);
    let p = int(PHYSICAL_ACTIVITY);
    let t = int(TERMINALLY_ILL);
    let m = lit(i64::from(min_comorbidities));

    let mut incomplete = gh
        .clone()
        .is_null()
        .or(e.clone().is_null())
        .or(p.clone().is_null());
    if scale == Scale::NinePoint {
        incomplete = incomplete.or(t.clone().is_null());
    }

    let low = gh.clone().eq(lit(1)).and(e.clone().eq(lit(1)).or(e.clone().eq(lit(2))));
    let mid = gh
        .clone()
        .eq(lit(1))
        .and(e.clone().eq(lit(3)).or(e.clone().eq(lit(4))))
        .or(gh
            .clone()
            .eq(lit(2))
            .or(gh.clone().eq(lit(3)))
            .and(e.clone().gt_eq(lit(1)))
            .and(e.clone().lt_eq(lit(4))));
    let active = p.clone().eq(lit(1));
    let inactive = p.eq(lit(0));

    let severity = when(b.clone().gt_eq(lit(3)))
        .then(score("7"))
        .when(b.gt_eq(lit(1)).or(iadl.clone().gt_eq(lit(5))))
        .then(score("6"))
        .when(iadl.gt_eq(lit(1)))
        .then(score("5"))
        .when(
            d.gt_eq(m)
                .or(gh.clone().eq(lit(4)))
                .or(gh.eq(lit(5)))
                .or(e.eq(lit(5))),
        )
        .then(score("4"))
        .when(low.clone().and(active.clone()))
        .then(score("1"))
        .when(mid.and(active).or(low.and(inactive)))
        .then(score("2"))
        .otherwise(score("3"));

    let missing = lit(NULL).cast(DataType::String);
    let expr = match scale {
        Scale::NinePoint => when(incomplete)
            .then(missing)
            .when(t.clone().eq(lit(1)).and(count(BALDS_COUNT).lt_eq(lit(2))))
            .then(score("9"))
            .when(t.eq(lit(1)))
            .then(score("8"))
            .otherwise(severity),
        Scale::SevenPoint => when(incomplete).then(missing).otherwise(severity),
    };
    expr.alias(EXPECTED_CFS)
}
