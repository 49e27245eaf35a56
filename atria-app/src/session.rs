use crate::error::AtriaAppError;
use crate::state::SelectionState;
use crate::sync::{FieldKind, SelectionSync};
use async_trait::async_trait;
use atria_common::config::SessionConfig;
use atria_common::value::FeatureRecord;
use atria_scales::error::AtriaScaleError;
use atria_scales::histogram::{Bin, HistogramBinner};
use atria_scales::year::{YearBin, YearBinner};
use atria_stats::summary::{StatsAggregator, SummaryStats};
use tracing::info;

/// External feature-source collaborator. The engine only ever consumes
/// already-resolved arrays; fetching, paging, and retries live behind this
/// trait.
#[async_trait]
pub trait FeatureSource {
    async fn features(&self, layer: &str) -> Result<Vec<FeatureRecord>, AtriaAppError>;

    /// Distinct values of a field, as the service computes them.
    async fn distinct_values(
        &self,
        layer: &str,
        field: &str,
        id_field: &str,
    ) -> Result<Vec<String>, AtriaAppError>;
}

/// A bootstrapped analytics session: the fetched feature set, the distinct
/// values backing the filter UI, the summary statistics, and the selection
/// state.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SessionConfig,
    pub features: Vec<FeatureRecord>,
    pub usage_values: Vec<String>,
    pub tenancy_values: Vec<String>,
    pub stats: SummaryStats,
    pub state: SelectionState,
}

impl Session {
    /// Fetches the feature set and the usage/tenancy distinct values in
    /// sequence, then computes the initial statistics. The distinct-value
    /// fetches deliberately complete before statistics run; there is no
    /// cancellation.
    pub async fn bootstrap(
        source: &dyn FeatureSource,
        config: SessionConfig,
    ) -> Result<Self, AtriaAppError> {
        let features = source.features(&config.layer).await?;

        let mut usage_values = source
            .distinct_values(&config.layer, &config.fields.usage, &config.fields.object_id)
            .await?;
        usage_values.sort();

        let mut tenancy_values = source
            .distinct_values(
                &config.layer,
                &config.fields.tenancy,
                &config.fields.object_id,
            )
            .await?;
        tenancy_values.sort();

        let stats = StatsAggregator::new(&config.fields)
            .ramp(config.category_ramp())
            .summarize(&features);

        info!(
            name = %config.name,
            features = features.len(),
            usage_values = usage_values.len(),
            "session bootstrapped"
        );

        Ok(Self {
            config,
            features,
            usage_values,
            tenancy_values,
            stats,
            state: SelectionState::new(),
        })
    }

    /// Bar-chart data for the area field.
    pub fn area_bins(&self, requested: usize) -> Result<Vec<Bin>, AtriaScaleError> {
        HistogramBinner::new(&self.config.fields.area)
            .bins(requested)
            .build(&self.features)
    }

    /// Bar-chart data for the lease-expiry field, one category per year.
    pub fn lease_expiry_bins(&self) -> Vec<YearBin> {
        YearBinner::new(&self.config.fields.lease_expiry).build(&self.features)
    }

    /// Synchronizer for the area bar chart on this session's layer.
    pub fn area_sync(&self) -> SelectionSync {
        SelectionSync::new(&self.config.layer, &self.config.fields.area, FieldKind::Numeric)
    }

    /// Synchronizer for the lease-expiry year chart.
    pub fn lease_expiry_sync(&self) -> SelectionSync {
        SelectionSync::new(
            &self.config.layer,
            &self.config.fields.lease_expiry,
            FieldKind::Year,
        )
    }

    /// Recomputes statistics over the currently combined filter result, or
    /// the full feature set when no filter is active.
    pub fn filtered_stats(&self) -> SummaryStats {
        let aggregator =
            StatsAggregator::new(&self.config.fields).ramp(self.config.category_ramp());
        match &self.state.combined_filtered_features {
            None => aggregator.summarize(&self.features),
            Some(ids) => {
                let subset: Vec<FeatureRecord> = self
                    .features
                    .iter()
                    .filter(|f| ids.contains(&f.object_id))
                    .cloned()
                    .collect();
                aggregator.summarize(&subset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atria_scales::distinct::distinct_values;
    use float_cmp::assert_approx_eq;
    use futures::executor::block_on;

    struct StaticSource {
        features: Vec<FeatureRecord>,
    }

    #[async_trait]
    impl FeatureSource for StaticSource {
        async fn features(&self, _layer: &str) -> Result<Vec<FeatureRecord>, AtriaAppError> {
            Ok(self.features.clone())
        }

        async fn distinct_values(
            &self,
            _layer: &str,
            field: &str,
            _id_field: &str,
        ) -> Result<Vec<String>, AtriaAppError> {
            Ok(distinct_values(&self.features, field))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl FeatureSource for FailingSource {
        async fn features(&self, _layer: &str) -> Result<Vec<FeatureRecord>, AtriaAppError> {
            Err(AtriaAppError::SourceError("layer offline".to_string()))
        }

        async fn distinct_values(
            &self,
            _layer: &str,
            _field: &str,
            _id_field: &str,
        ) -> Result<Vec<String>, AtriaAppError> {
            Ok(Vec::new())
        }
    }

    fn demo_features() -> Vec<FeatureRecord> {
        vec![
            FeatureRecord::new(1)
                .with_attr("Use_", "Office")
                .with_attr("Tenant", "Acme")
                .with_attr("sq_m", 120.0)
                .with_attr("BuildID", 1.0),
            FeatureRecord::new(2)
                .with_attr("Use_", "Retail")
                .with_attr("Tenant", "Bobs")
                .with_attr("sq_m", 80.0)
                .with_attr("BuildID", 1.0),
            FeatureRecord::new(3)
                .with_attr("Use_", "Office")
                .with_attr("Tenant", "Acme")
                .with_attr("sq_m", 300.0)
                .with_attr("BuildID", 2.0),
        ]
    }

    #[test]
    fn test_bootstrap_sequences_fetches_and_stats() {
        let source = StaticSource {
            features: demo_features(),
        };
        let session = block_on(Session::bootstrap(&source, SessionConfig::demo())).unwrap();

        assert_eq!(session.features.len(), 3);
        assert_eq!(session.usage_values, vec!["Office", "Retail"]);
        assert_eq!(session.tenancy_values, vec!["Acme", "Bobs"]);
        assert_eq!(session.stats.unit_count, 2);
        assert_eq!(session.state, SelectionState::new());
    }

    #[test]
    fn test_session_chart_data() {
        let source = StaticSource {
            features: demo_features(),
        };
        let session = block_on(Session::bootstrap(&source, SessionConfig::demo())).unwrap();

        let bins = session.area_bins(3).unwrap();
        assert_eq!(bins.iter().map(|b| b.count).sum::<u32>(), 3);
        // No lease-expiry attribute in the demo fixtures.
        assert!(session.lease_expiry_bins().is_empty());
    }

    #[test]
    fn test_bootstrap_propagates_source_errors() {
        let result = block_on(Session::bootstrap(&FailingSource, SessionConfig::demo()));
        assert!(matches!(result, Err(AtriaAppError::SourceError(_))));
    }

    #[test]
    fn test_filtered_stats_respects_combined_set() {
        let source = StaticSource {
            features: demo_features(),
        };
        let mut session = block_on(Session::bootstrap(&source, SessionConfig::demo())).unwrap();
        session.state.filters.usage = Some(vec![1, 3]);
        let all = session.features.clone();
        session.state.refresh_combined(&all);

        let stats = session.filtered_stats();
        assert_eq!(stats.most_common_usage.unwrap().category, "Office");
        assert_approx_eq!(f64, stats.total_area, 420.0);
    }
}
