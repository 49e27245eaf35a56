use atria_common::color::Rgba;
use atria_common::value::FeatureRecord;
use atria_renderer::build::{highlight_range, highlight_year, overview, overview_years};
use atria_renderer::spec::RendererSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// External render surface: receives renderer assignments on a named layer
/// and ambient-effect toggles.
pub trait RenderSurface {
    fn apply_renderer(&mut self, layer: &str, spec: RendererSpec);
    fn set_direct_shadows(&mut self, enabled: bool);
    fn set_ambient_occlusion(&mut self, enabled: bool);
}

/// Synchronizer state: either the full-ramp overview, or a single bin or
/// category drilled down with the rest grayed out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VizMode {
    #[default]
    Overview,
    Drilldown,
}

/// Kind of field the active chart is built over, which decides the overview
/// renderer shape on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    Year,
}

/// Payload of a chart item click: the bin range or year category that was
/// clicked, with its chart color.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartItem {
    Range { min: f64, max: f64, color: Rgba },
    Year { year: i32, color: Rgba },
}

/// Events emitted by the external chart display.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    ItemClick(ChartItem),
    Reload,
}

/// Selection-Renderer Synchronizer: reacts to chart events by swapping the
/// layer renderer between overview and drill-down and toggling the ambient
/// rendering effects. Processes one event at a time; a repeated click
/// simply re-runs the transition (last write wins).
#[derive(Debug, Clone)]
pub struct SelectionSync {
    layer: String,
    field: String,
    kind: FieldKind,
    mode: VizMode,
}

impl SelectionSync {
    pub fn new(layer: &str, field: &str, kind: FieldKind) -> Self {
        Self {
            layer: layer.to_string(),
            field: field.to_string(),
            kind,
            mode: VizMode::default(),
        }
    }

    pub fn mode(&self) -> VizMode {
        self.mode
    }

    pub fn dispatch(
        &mut self,
        event: &ChartEvent,
        features: &[FeatureRecord],
        surface: &mut dyn RenderSurface,
    ) {
        match event {
            ChartEvent::ItemClick(item) => {
                let spec = match item {
                    ChartItem::Range { min, max, color } => {
                        highlight_range(&self.field, *min, *max, *color)
                    }
                    ChartItem::Year { year, color } => {
                        highlight_year(&self.field, *year, *color)
                    }
                };
                surface.apply_renderer(&self.layer, spec);
                surface.set_direct_shadows(false);
                surface.set_ambient_occlusion(false);
                self.mode = VizMode::Drilldown;
                debug!(layer = %self.layer, field = %self.field, "entered drilldown");
            }
            ChartEvent::Reload => {
                let spec = match self.kind {
                    FieldKind::Numeric => overview(&self.field, features),
                    FieldKind::Year => overview_years(&self.field, features),
                };
                if let Some(spec) = spec {
                    surface.apply_renderer(&self.layer, spec);
                }
                surface.set_direct_shadows(true);
                surface.set_ambient_occlusion(true);
                self.mode = VizMode::Overview;
                debug!(layer = %self.layer, field = %self.field, "returned to overview");
            }
        }
    }
}
