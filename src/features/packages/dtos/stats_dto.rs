use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::packages::models::{PackageStatus, ProcurementType};

/// Aggregates over the filtered packages, as read from the database
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct PackageTotals {
    pub total: i64,
    pub budget: i64,
    pub hps: i64,
    pub realization: i64,
}

/// Dashboard statistics for the current filter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatsDto {
    pub summary: StatsSummaryDto,
    pub by_status: Vec<StatusCountDto>,
    pub by_type: Vec<TypeCountDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummaryDto {
    /// Packages matching the filter
    pub total_packages: i64,
    /// Packages in the whole dataset
    pub total_all_packages: i64,
    /// Whether the filter hides part of the dataset
    pub is_filtered: bool,
    pub total_budget: i64,
    pub total_hps: i64,
    pub total_realization: i64,
    /// Realization over budget, in percent with one decimal
    pub absorption_percentage: f64,
}

impl StatsSummaryDto {
    pub fn new(totals: PackageTotals, total_all_packages: i64) -> Self {
        let absorption_percentage = if totals.budget > 0 {
            round1(totals.realization as f64 / totals.budget as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            total_packages: totals.total,
            total_all_packages,
            is_filtered: total_all_packages > 0 && totals.total != total_all_packages,
            total_budget: totals.budget,
            total_hps: totals.hps,
            total_realization: totals.realization,
            absorption_percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountDto {
    pub status: PackageStatus,
    pub label: String,
    pub count: i64,
    /// Share of the filtered packages, in percent with one decimal
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeCountDto {
    #[serde(rename = "type")]
    pub procurement_type: ProcurementType,
    pub label: String,
    pub count: i64,
    pub percentage: f64,
}

impl PackageStatsDto {
    /// Assemble the stats from raw aggregates.
    ///
    /// Breakdowns omit zero counts and are sorted by count, largest first;
    /// ties keep the enum declaration order.
    pub fn build(
        totals: PackageTotals,
        total_all_packages: i64,
        status_counts: &[(PackageStatus, i64)],
        type_counts: &[(ProcurementType, i64)],
    ) -> Self {
        let total = totals.total;

        let by_status = breakdown(&PackageStatus::ALL, status_counts, total)
            .into_iter()
            .map(|(status, count, percentage)| StatusCountDto {
                status,
                label: status.label().to_string(),
                count,
                percentage,
            })
            .collect();

        let by_type = breakdown(&ProcurementType::ALL, type_counts, total)
            .into_iter()
            .map(|(procurement_type, count, percentage)| TypeCountDto {
                procurement_type,
                label: procurement_type.label().to_string(),
                count,
                percentage,
            })
            .collect();

        Self {
            summary: StatsSummaryDto::new(totals, total_all_packages),
            by_status,
            by_type,
        }
    }
}

fn breakdown<T: Copy + PartialEq>(
    order: &[T],
    counts: &[(T, i64)],
    total: i64,
) -> Vec<(T, i64, f64)> {
    let mut rows: Vec<(T, i64, f64)> = order
        .iter()
        .filter_map(|key| {
            let count: i64 = counts
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, c)| *c)
                .sum();
            (count > 0).then(|| (*key, count, percentage(count, total)))
        })
        .collect();

    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

fn percentage(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round1(count as f64 / total as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total: i64, budget: i64, realization: i64) -> PackageTotals {
        PackageTotals {
            total,
            budget,
            hps: budget,
            realization,
        }
    }

    #[test]
    fn test_absorption_percentage() {
        let summary = StatsSummaryDto::new(totals(3, 1_000, 333), 3);
        assert_eq!(summary.absorption_percentage, 33.3);
        assert!(!summary.is_filtered);

        let summary = StatsSummaryDto::new(totals(0, 0, 0), 10);
        assert_eq!(summary.absorption_percentage, 0.0);
        assert!(summary.is_filtered);
    }

    #[test]
    fn test_empty_dataset_is_not_filtered() {
        let summary = StatsSummaryDto::new(PackageTotals::default(), 0);
        assert!(!summary.is_filtered);
    }

    #[test]
    fn test_breakdown_omits_zero_and_sorts_descending() {
        let stats = PackageStatsDto::build(
            totals(8, 100, 50),
            8,
            &[
                (PackageStatus::Planning, 1),
                (PackageStatus::Completed, 5),
                (PackageStatus::Suspended, 2),
                (PackageStatus::AtRisk, 0),
            ],
            &[(ProcurementType::Swakelola, 4), (ProcurementType::Tender, 4)],
        );

        let statuses: Vec<_> = stats.by_status.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                PackageStatus::Completed,
                PackageStatus::Suspended,
                PackageStatus::Planning
            ]
        );
        assert_eq!(stats.by_status[0].percentage, 62.5);
        assert_eq!(stats.by_status[0].label, "Selesai");

        // equal counts keep declaration order
        let types: Vec<_> = stats.by_type.iter().map(|t| t.procurement_type).collect();
        assert_eq!(types, vec![ProcurementType::Tender, ProcurementType::Swakelola]);
        assert_eq!(stats.by_type[0].percentage, 50.0);
    }

    #[test]
    fn test_breakdown_with_no_packages() {
        let stats = PackageStatsDto::build(PackageTotals::default(), 0, &[], &[]);
        assert!(stats.by_status.is_empty());
        assert!(stats.by_type.is_empty());
    }
}
