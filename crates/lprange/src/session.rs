//! Session state: the controller, the axis view and the loaded series.
//!
//! A [`Session`] reacts to discrete external events (pointer input, typed
//! bounds, user actions and series arriving from fetches) on a single thread.
//! Each entry point mutates state, raises [`AppEvent`]s on the bus and then
//! drains them into [`Command`]s before returning, so derived values such as
//! liquidity in range are always up to date when the call returns.

use std::fmt::Display;

use lprange_config::{Config, RangeConfig};
use lprange_core::{
    aggregate_bounds, estimate, summarize, Bound, EstimateResult, FeeRecord, FeeSummary,
    LiquidityTick, PricePoint, RangeBounds,
};
use lprange_data::{RequestId, SeriesKind, SeriesStore};

use crate::coords::ValueAxis;
use crate::events::{AppEvent, Command, EventBus, PointerEvent};
use crate::range::{prepare_overlay, ListenerId, RangeController, RangeOverlay};

/// Default chart area height used until the renderer reports its size.
pub const DEFAULT_AXIS_HEIGHT_PX: f64 = 600.0;

/// One user session over a single pool.
#[derive(Debug)]
pub struct Session {
    range_config: RangeConfig,
    controller: RangeController,
    axis: ValueAxis,
    store: SeriesStore,
    fee_summary: FeeSummary,
    liquidity_in_range: Option<f64>,
    last_estimate: Option<EstimateResult>,
    fetch_error: Option<(SeriesKind, String)>,
    /// A price refresh arrived mid-drag; refit once the drag ends.
    fit_pending: bool,
    bus: EventBus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            range_config: config.range.clone(),
            controller: RangeController::new(&config.range),
            axis: ValueAxis::new(DEFAULT_AXIS_HEIGHT_PX),
            store: SeriesStore::new(),
            fee_summary: FeeSummary::default(),
            liquidity_in_range: None,
            last_estimate: None,
            fetch_error: None,
            fit_pending: false,
            bus: EventBus::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current bounds, absent until price data has loaded.
    pub fn bounds(&self) -> Option<RangeBounds> {
        self.controller.bounds()
    }

    pub fn controller(&self) -> &RangeController {
        &self.controller
    }

    pub fn axis(&self) -> &ValueAxis {
        &self.axis
    }

    pub fn prices(&self) -> Option<&[PricePoint]> {
        self.store.prices()
    }

    pub fn fees(&self) -> Option<&[FeeRecord]> {
        self.store.fees()
    }

    pub fn ticks(&self) -> Option<&[LiquidityTick]> {
        self.store.ticks()
    }

    /// Most recent price, if any.
    pub fn latest_price(&self) -> Option<f64> {
        self.store.latest_price().map(|p| p.price)
    }

    pub fn fee_summary(&self) -> FeeSummary {
        self.fee_summary
    }

    /// Liquidity overlapping the current bounds; `None` until both bounds and
    /// ticks are available.
    pub fn liquidity_in_range(&self) -> Option<f64> {
        self.liquidity_in_range
    }

    /// Result of the last [`Session::calculate`], cleared whenever its inputs change.
    pub fn last_estimate(&self) -> Option<EstimateResult> {
        self.last_estimate
    }

    /// The single user-visible fetch error message, if any.
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_ref().map(|(_, msg)| msg.as_str())
    }

    /// Render data for the range overlay.
    pub fn overlay(&self) -> Option<RangeOverlay> {
        prepare_overlay(&self.controller, &self.axis, self.store.ticks().unwrap_or_default())
    }

    /// Register a bounds observer on the controller.
    pub fn on_bounds_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RangeBounds) + 'static,
    {
        self.controller.on_bounds_changed(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.controller.remove_listener(id)
    }

    // =========================================================================
    // Data arrival
    // =========================================================================

    /// Start a fetch for a series; pass the returned id to the matching `land_*`.
    pub fn begin_fetch(&mut self, kind: SeriesKind) -> RequestId {
        self.store.begin(kind)
    }

    /// Store a fetched price series. Stale results are ignored.
    pub fn land_prices(&mut self, id: RequestId, prices: Vec<PricePoint>) -> bool {
        let accepted = self.store.land_prices(id, prices);
        self.after_landing(id.kind, accepted)
    }

    /// Store a fetched fee series. Stale results are ignored.
    pub fn land_fees(&mut self, id: RequestId, fees: Vec<FeeRecord>) -> bool {
        let accepted = self.store.land_fees(id, fees);
        self.after_landing(id.kind, accepted)
    }

    /// Store a fetched tick snapshot. Stale results are ignored.
    pub fn land_ticks(&mut self, id: RequestId, ticks: Vec<LiquidityTick>) -> bool {
        let accepted = self.store.land_ticks(id, ticks);
        self.after_landing(id.kind, accepted)
    }

    fn after_landing(&mut self, kind: SeriesKind, accepted: bool) -> bool {
        if accepted {
            self.bus.emit(AppEvent::SeriesLanded(kind));
            self.process_events();
        }
        accepted
    }

    /// Record a failed fetch. Other series keep working.
    pub fn fetch_failed(&mut self, id: RequestId, error: impl Display) {
        if !self.store.land_failure(id) {
            return;
        }
        self.bus.emit(AppEvent::FetchFailed {
            kind: id.kind,
            message: format!("Failed to load {}: {}", id.kind.name(), error),
        });
        self.process_events();
    }

    // =========================================================================
    // User input
    // =========================================================================

    /// Route a pointer event to the range controller.
    ///
    /// Returns `true` if the controller consumed it; unconsumed presses and
    /// drags are free to pan the chart.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let before = self.controller.bounds();
        let consumed = self.controller.handle_pointer(event, &self.axis);
        if self.fit_pending && !self.controller.is_dragging() {
            self.fit_view(false);
        }
        self.note_bounds_change(before);
        consumed
    }

    /// Set bounds from typed values.
    pub fn set_bounds(&mut self, lower: Option<f64>, upper: Option<f64>) -> bool {
        let changed = self.controller.set_bounds(lower, upper);
        if changed {
            self.bus.emit(AppEvent::BoundsChanged);
            self.process_events();
        }
        changed
    }

    /// Set one bound from a typed value.
    pub fn set_bound(&mut self, bound: Bound, value: f64) -> bool {
        match bound {
            Bound::Lower => self.set_bounds(Some(value), None),
            Bound::Upper => self.set_bounds(None, Some(value)),
        }
    }

    /// Reset bounds around the latest price, refit the view to show them and
    /// clear zoom/pan.
    ///
    /// Does nothing before valid price data has loaded.
    pub fn reset_bounds(&mut self) -> bool {
        let Some(price) = self.latest_price() else {
            return false;
        };
        let before = self.controller.bounds();
        if !self.controller.reset(Some(price)) {
            return false;
        }
        self.fit_view(true);
        log::info!("Reset range bounds around {}", price);
        self.note_bounds_change(before);
        true
    }

    /// Zoom the value axis by `steps` zoom steps around pixel row `anchor_y`.
    pub fn zoom(&mut self, steps: i32, anchor_y: f64) {
        if self.controller.is_dragging() {
            return;
        }
        self.axis.zoom(self.range_config.zoom_step.powi(steps), anchor_y);
    }

    /// Pan the value axis by a pointer drag of `dy` pixels.
    pub fn pan(&mut self, dy: f64) {
        if self.controller.is_dragging() {
            return;
        }
        self.axis.pan(dy);
    }

    /// Update the chart area height.
    pub fn resize(&mut self, height_px: f64) {
        self.axis.resize(height_px);
    }

    /// Estimate returns for `deposit` over the current bounds.
    ///
    /// Liquidity is re-aggregated from the current bounds on every call.
    pub fn calculate(&mut self, deposit: f64) -> EstimateResult {
        let liquidity = self.current_liquidity();
        self.liquidity_in_range = liquidity;
        let result = match (liquidity, self.fee_summary.last_7d) {
            (Some(liquidity), Some(fees_7d)) => estimate(deposit, liquidity, fees_7d),
            _ => EstimateResult::unavailable(),
        };
        log::debug!("Estimate for deposit {}: {:?}", deposit, result);
        self.last_estimate = Some(result);
        result
    }

    // =========================================================================
    // Event processing
    // =========================================================================

    fn note_bounds_change(&mut self, before: Option<RangeBounds>) {
        if self.controller.bounds() != before {
            self.bus.emit(AppEvent::BoundsChanged);
            self.process_events();
        }
    }

    /// Refit the home window to the prices plus the current bounds.
    ///
    /// The new window is shown when `show` is set or the user has not zoomed
    /// or panned; otherwise the user's view is kept.
    fn fit_view(&mut self, show: bool) {
        self.fit_pending = false;
        let Some(prices) = self.store.prices().filter(|p| !p.is_empty()) else {
            return;
        };
        let (mut min, mut max) = prices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.price), hi.max(p.price))
            });
        // Bounds handles stay on screen
        if let Some(bounds) = self.controller.bounds() {
            min = min.min(bounds.lower());
            max = max.max(bounds.upper());
        }
        let zoomed = self.axis.is_zoomed();
        self.axis.set_home(min, max, self.range_config.view_padding);
        if show || !zoomed {
            self.axis.reset_view();
        }
    }

    fn current_liquidity(&self) -> Option<f64> {
        let bounds = self.controller.bounds()?;
        let ticks = self.store.ticks()?;
        Some(aggregate_bounds(ticks, &bounds))
    }

    /// Translate queued events into commands and execute them until both queues are empty.
    fn process_events(&mut self) {
        while self.bus.has_events() || self.bus.has_commands() {
            for event in self.bus.take_events() {
                match event {
                    AppEvent::BoundsChanged => {
                        self.bus.dispatch_all([Command::RecomputeLiquidity, Command::InvalidateEstimate]);
                    }
                    AppEvent::SeriesLanded(SeriesKind::Prices) => {
                        self.bus.dispatch_all([
                            Command::ClearError(SeriesKind::Prices),
                            Command::SeedBounds,
                            Command::FitView,
                        ]);
                    }
                    AppEvent::SeriesLanded(SeriesKind::Fees) => {
                        self.bus.dispatch_all([
                            Command::ClearError(SeriesKind::Fees),
                            Command::RecomputeFeeSummary,
                            Command::InvalidateEstimate,
                        ]);
                    }
                    AppEvent::SeriesLanded(SeriesKind::Ticks) => {
                        self.bus.dispatch_all([
                            Command::ClearError(SeriesKind::Ticks),
                            Command::RecomputeLiquidity,
                            Command::InvalidateEstimate,
                        ]);
                    }
                    AppEvent::FetchFailed { kind, message } => {
                        self.fetch_error = Some((kind, message.clone()));
                        self.bus.dispatch(Command::ShowError(message));
                    }
                }
            }

            for cmd in self.bus.take_commands() {
                self.execute(cmd);
            }
        }
    }

    fn execute(&mut self, cmd: Command) {
        match cmd {
            Command::FitView => {
                if self.controller.is_dragging() {
                    self.fit_pending = true;
                } else {
                    self.fit_view(false);
                }
            }
            Command::SeedBounds => {
                if let Some(price) = self.latest_price() {
                    if self.controller.seed(price) {
                        self.bus.emit(AppEvent::BoundsChanged);
                    }
                }
            }
            Command::RecomputeLiquidity => {
                self.liquidity_in_range = self.current_liquidity();
            }
            Command::RecomputeFeeSummary => {
                self.fee_summary = self.store.fees().map(summarize).unwrap_or_default();
            }
            Command::InvalidateEstimate => {
                self.last_estimate = None;
            }
            Command::ShowError(message) => {
                log::warn!("{}", message);
            }
            Command::ClearError(kind) => {
                if matches!(self.fetch_error, Some((k, _)) if k == kind) {
                    self.fetch_error = None;
                }
            }
        }
    }
}
