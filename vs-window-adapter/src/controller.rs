use std::sync::Arc;

use vs_window::{
    AnimationState, AutoSize, AutosizeProbe, ConfigChange, ConfigError, LayoutParams,
    ProbeOutcome, SizeModel, SourceExpression, ViewportState, VisibleRange, WindowOptions,
    compute_range, position_of, total_extent,
};

use crate::{Coalescer, Deadline, PlacedItem, RenderEffect, RenderReason, RetryTask};

/// Element size used while nothing has been measured and the viewport is unknown.
pub const FALLBACK_ELEMENT_SIZE: f64 = 50.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerState {
    #[default]
    Uninitialized,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProbeState {
    Idle,
    Requested,
    Retrying(RetryTask),
}

/// A framework-neutral controller that owns the window state of one scroll container.
///
/// It holds no UI objects. Hosts drive it by calling:
/// - `start` once the container is attached
/// - `on_scroll` / `on_resize` / `on_collection_changed` / `on_config_changed` when UI events
///   occur, or `queue_scroll` / `queue_resize` to coalesce high-frequency events
/// - `tick(now_ms)` each frame/timer tick (coalesced input, autosize retries, tile transitions)
///
/// Every call returns at most one [`RenderEffect`]; `None` means the materialized window is
/// unchanged and the host has nothing to do.
pub struct ScrollWindowController<T> {
    options: WindowOptions<T>,
    source: Option<SourceExpression>,
    state: ControllerState,
    collection: Arc<[T]>,
    size_model: SizeModel,
    layout: LayoutParams,
    viewport: ViewportState,
    measured: Option<AutoSize>,
    probe: ProbeState,
    range: Option<VisibleRange>,
    // Transient marker consumed by the next effect.
    animation: AnimationState,
    scroll_to: Option<f64>,
    pending_scroll: Coalescer<f64>,
    pending_resize: Coalescer<f64>,
    transition: Option<Deadline>,
    now_ms: u64,
}

impl<T> ScrollWindowController<T> {
    pub fn new(options: WindowOptions<T>) -> Result<Self, ConfigError> {
        Self::with_scroll_parent_resolver(options, |_| true)
    }

    /// Like [`Self::new`], but asks `resolve` whether the configured scroll parent exists.
    pub fn with_scroll_parent_resolver(
        options: WindowOptions<T>,
        resolve: impl FnOnce(&str) -> bool,
    ) -> Result<Self, ConfigError> {
        let source = options.validate()?;
        if let Some(selector) = options.scroll_parent.as_deref() {
            if !resolve(selector) {
                vwarn!(selector, "scroll parent not found");
                return Err(ConfigError::ScrollParentNotFound(selector.to_owned()));
            }
        }
        if options.tile && options.size_accessor.is_some() {
            vwarn!("size accessor is ignored in tile mode");
        }

        let layout = options.layout_params(None, FALLBACK_ELEMENT_SIZE);
        let frame_interval_ms = options.frame_interval_ms;
        Ok(Self {
            source,
            state: ControllerState::Uninitialized,
            collection: Arc::from(Vec::new()),
            size_model: SizeModel::uniform(layout.item_main()),
            layout,
            viewport: ViewportState::default(),
            measured: None,
            probe: ProbeState::Idle,
            range: None,
            animation: AnimationState::Idle,
            scroll_to: None,
            pending_scroll: Coalescer::new(frame_interval_ms),
            pending_resize: Coalescer::new(frame_interval_ms),
            transition: None,
            now_ms: 0,
            options,
        })
    }

    /// Attaches the controller to a laid-out container and emits the first window.
    ///
    /// Calling it again reinitializes from scratch (the previous measurement is kept).
    pub fn start(
        &mut self,
        viewport: ViewportState,
        collection: impl Into<Arc<[T]>>,
    ) -> RenderEffect<T> {
        self.pending_scroll.clear();
        self.pending_resize.clear();
        self.viewport = viewport;
        self.collection = collection.into();
        self.state = ControllerState::Ready;
        if self.options.autosize() && self.measured.is_none() {
            self.probe = ProbeState::Requested;
        }
        self.rebuild(true);

        vdebug!(
            count = self.collection.len(),
            viewport_extent = self.viewport.viewport_extent,
            "controller started"
        );
        let next = self.compute();
        self.range = Some(next);
        self.effect(None, next, RenderReason::Initialized)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn options(&self) -> &WindowOptions<T> {
        &self.options
    }

    pub fn source_expression(&self) -> Option<&SourceExpression> {
        self.source.as_ref()
    }

    pub fn collection(&self) -> &Arc<[T]> {
        &self.collection
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn size_model(&self) -> &SizeModel {
        &self.size_model
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn measured(&self) -> Option<&AutoSize> {
        self.measured.as_ref()
    }

    /// The range materialized by the last effect.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// Total scroll-axis size for the filler element.
    pub fn extent(&self) -> f64 {
        total_extent(&self.size_model, &self.layout, self.collection.len())
    }

    pub fn is_autosize_pending(&self) -> bool {
        self.probe != ProbeState::Idle
    }

    pub fn autosize_attempts(&self) -> u32 {
        match self.probe {
            ProbeState::Retrying(task) => task.attempts(),
            _ => 0,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn has_pending_input(&self) -> bool {
        self.pending_scroll.is_pending() || self.pending_resize.is_pending()
    }

    /// Scroll updates replaced by a newer one before they were processed.
    pub fn coalesced_scrolls(&self) -> u64 {
        self.pending_scroll.superseded()
    }

    pub fn on_scroll(&mut self, scroll_position: f64) -> Option<RenderEffect<T>> {
        if !scroll_position.is_finite() {
            vwarn!(scroll_position, "ignoring non-finite scroll position");
            return None;
        }
        self.pending_scroll.clear();
        self.viewport = self.viewport.with_scroll_position(scroll_position);
        self.update(RenderReason::Scrolled, false)
    }

    pub fn on_resize(&mut self, viewport_extent: f64) -> Option<RenderEffect<T>> {
        if !viewport_extent.is_finite() {
            vwarn!(viewport_extent, "ignoring non-finite viewport extent");
            return None;
        }
        self.pending_resize.clear();
        if !self.set_viewport_extent(viewport_extent) {
            vtrace!(viewport_extent, "resize without size change");
            return None;
        }
        let measured = self.run_probe();
        let before = self.layout;
        self.rebuild(false);
        let force = measured || self.layout != before;
        self.update(
            if measured {
                RenderReason::Measured
            } else {
                RenderReason::Resized
            },
            force,
        )
    }

    /// Replaces the collection and reinitializes the window.
    ///
    /// Queued scroll/resize input is applied first, so the new window reflects it.
    pub fn on_collection_changed(
        &mut self,
        collection: impl Into<Arc<[T]>>,
    ) -> Option<RenderEffect<T>> {
        self.absorb_pending();
        self.collection = collection.into();
        if self.options.autosize() && self.measured.is_none() && self.probe == ProbeState::Idle {
            self.probe = ProbeState::Requested;
        }
        self.rebuild(true);
        vdebug!(count = self.collection.len(), "collection changed");
        self.reinitialize(RenderReason::CollectionChanged)
    }

    /// Applies one option change. On error the previous configuration stays in effect and queued
    /// input stays queued; otherwise queued input is applied first.
    pub fn on_config_changed(
        &mut self,
        change: ConfigChange,
    ) -> Result<Option<RenderEffect<T>>, ConfigError> {
        let was_tile = self.options.tile;
        self.options.apply(change)?;
        self.absorb_pending();
        let was_scrolled = self.viewport.scroll_position > 0.0;
        vdebug!(?change, "config changed");

        if self.options.tile && self.options.size_accessor.is_some() {
            vwarn!("size accessor is ignored in tile mode");
        }
        if change.affects_layout() && self.options.autosize() {
            self.probe = ProbeState::Requested;
        }
        if self.options.tile != was_tile {
            self.toggle_tile(was_scrolled);
        }

        self.rebuild(true);
        if !change.affects_render() {
            return Ok(None);
        }
        Ok(self.reinitialize(RenderReason::ConfigChanged))
    }

    /// Replaces the per-item size accessor and reinitializes the window.
    pub fn set_size_accessor(
        &mut self,
        size_accessor: Option<vs_window::SizeAccessor<T>>,
    ) -> Option<RenderEffect<T>> {
        self.absorb_pending();
        self.options.size_accessor = size_accessor;
        if self.options.autosize() && self.measured.is_none() {
            self.probe = ProbeState::Requested;
        }
        self.rebuild(true);
        self.reinitialize(RenderReason::ConfigChanged)
    }

    /// Forces a full recompute and emit (e.g. after the host changed item sizes in place).
    pub fn on_manual_trigger(&mut self) -> Option<RenderEffect<T>> {
        self.absorb_pending();
        self.rebuild(true);
        self.reinitialize(RenderReason::ManualTrigger)
    }

    /// Schedules a measurement on the next tick.
    pub fn request_autosize(&mut self) {
        if self.options.measure.is_none() {
            vdebug!("autosize requested without a measure callback");
        }
        self.probe = ProbeState::Requested;
    }

    /// Stops a pending autosize retry. The fallback size stays in effect.
    pub fn cancel_autosize_retry(&mut self) {
        if matches!(self.probe, ProbeState::Retrying(_)) {
            vdebug!("autosize retry cancelled");
            self.probe = ProbeState::Idle;
        }
    }

    /// Records a scroll position to be processed on the next due tick.
    pub fn queue_scroll(&mut self, scroll_position: f64) {
        if scroll_position.is_finite() {
            self.pending_scroll.push(scroll_position);
        }
    }

    /// Records a viewport extent to be processed on the next due tick.
    pub fn queue_resize(&mut self, viewport_extent: f64) {
        if viewport_extent.is_finite() {
            self.pending_resize.push(viewport_extent);
        }
    }

    /// Advances the controller.
    ///
    /// Handles, in order: a finished tile transition, the latest queued resize, the latest queued
    /// scroll, then a requested or due autosize probe. All of it folds into at most one effect.
    pub fn tick(&mut self, now_ms: u64) -> Option<RenderEffect<T>> {
        self.now_ms = now_ms;
        if self.state != ControllerState::Ready {
            return None;
        }

        let mut reason = None;
        let mut force = false;

        if self.transition.is_some_and(|t| t.is_done(now_ms)) {
            self.transition = None;
            if self.options.animation.is_some() {
                self.animation = AnimationState::Entering;
            }
            reason = Some(RenderReason::TransitionFinished);
            force = true;
        }

        if let Some(extent) = self.pending_resize.take_due(now_ms) {
            if self.set_viewport_extent(extent) {
                reason.get_or_insert(RenderReason::Resized);
            }
        }

        if let Some(position) = self.pending_scroll.take_due(now_ms) {
            self.viewport = self.viewport.with_scroll_position(position);
            reason.get_or_insert(RenderReason::Scrolled);
        }

        if self.run_probe() {
            reason.get_or_insert(RenderReason::Measured);
            force = true;
        }

        let reason = reason?;
        let before = self.layout;
        self.rebuild(false);
        if self.layout != before {
            force = true;
        }
        self.update(reason, force)
    }

    fn toggle_tile(&mut self, was_scrolled: bool) {
        if let Some(animation) = self.options.animation {
            self.animation = AnimationState::Exiting;
            let delay = if was_scrolled { 0 } else { animation.duration_ms };
            self.transition = Some(Deadline::new(self.now_ms, delay));
        }
        if self.options.tile {
            self.pending_scroll.clear();
            self.viewport = self.viewport.with_scroll_position(0.0);
            self.scroll_to = Some(0.0);
        }
        vdebug!(tile = self.options.tile, "layout mode switched");
    }

    // Returns `true` when the extent actually changed.
    fn set_viewport_extent(&mut self, viewport_extent: f64) -> bool {
        let next = self.viewport.with_viewport_extent(viewport_extent);
        if next == self.viewport {
            return false;
        }
        self.viewport = next;
        if self.options.autoresize && self.options.element_size.is_none() {
            self.probe = ProbeState::Requested;
        }
        true
    }

    fn absorb_pending(&mut self) {
        if let Some(extent) = self.pending_resize.take() {
            self.set_viewport_extent(extent);
        }
        if let Some(position) = self.pending_scroll.take() {
            self.viewport = self.viewport.with_scroll_position(position);
        }
    }

    // Runs a requested or due probe. Returns `true` when a new measurement was stored.
    fn run_probe(&mut self) -> bool {
        let retry = match self.probe {
            ProbeState::Idle => return false,
            ProbeState::Requested => None,
            ProbeState::Retrying(task) if !task.is_due(self.now_ms) => return false,
            ProbeState::Retrying(task) => Some(task),
        };
        let Some(measure) = self.options.measure.clone() else {
            self.probe = ProbeState::Idle;
            return false;
        };

        let measurement = measure();
        let probe = AutosizeProbe::new(
            self.options.orientation,
            self.options.tile,
            self.options.items_per_row,
        );
        match probe.probe(measurement.sample, measurement.container) {
            ProbeOutcome::Measured(size) => {
                self.probe = ProbeState::Idle;
                vdebug!(
                    element_size = size.element_size,
                    items_per_row = size.items_per_row,
                    "autosize measured"
                );
                if self.measured == Some(size) {
                    return false;
                }
                self.measured = Some(size);
                true
            }
            ProbeOutcome::Pending => {
                let task = match retry {
                    Some(mut task) => {
                        task.reschedule(self.now_ms);
                        task
                    }
                    None => RetryTask::new(self.options.retry_interval_ms, self.now_ms),
                };
                vtrace!(attempts = task.attempts(), "autosize pending, retrying");
                self.probe = ProbeState::Retrying(task);
                false
            }
        }
    }

    fn fallback_size(&self) -> f64 {
        if self.viewport.viewport_extent > 0.0 {
            self.viewport.viewport_extent
        } else {
            FALLBACK_ELEMENT_SIZE
        }
    }

    // `sizes` forces the per-item prefix sums to be rebuilt from the collection.
    fn rebuild(&mut self, sizes: bool) {
        self.layout = self
            .options
            .layout_params(self.measured.as_ref(), self.fallback_size());
        match &self.options.size_accessor {
            Some(size_of) if self.options.uses_size_accessor() => {
                if sizes || self.size_model.is_uniform() {
                    self.size_model =
                        SizeModel::per_item(self.collection.iter().map(|item| size_of(item)));
                }
            }
            _ => self.size_model = SizeModel::uniform(self.layout.item_main()),
        }
    }

    fn compute(&self) -> VisibleRange {
        compute_range(
            self.viewport,
            &self.size_model,
            &self.layout,
            self.collection.len(),
        )
    }

    fn reinitialize(&mut self, reason: RenderReason) -> Option<RenderEffect<T>> {
        self.range = None;
        self.update(reason, true)
    }

    fn update(&mut self, reason: RenderReason, force: bool) -> Option<RenderEffect<T>> {
        if self.state != ControllerState::Ready {
            return None;
        }
        let next = self.compute();
        if !force && self.range == Some(next) {
            vtrace!(
                start = next.start_index,
                end = next.end_index,
                "range unchanged, render suppressed"
            );
            return None;
        }
        if reason.is_reinitialization() {
            vdebug!(?reason, count = self.collection.len(), "window reinitialized");
        }
        let prev = self.range.replace(next);
        Some(self.effect(prev, next, reason))
    }

    fn effect(
        &mut self,
        prev: Option<VisibleRange>,
        next: VisibleRange,
        reason: RenderReason,
    ) -> RenderEffect<T> {
        let marker = core::mem::take(&mut self.animation);
        let animate = self.options.animation.is_some();
        let exiting = marker == AnimationState::Exiting;
        let all_entering = marker == AnimationState::Entering;

        let placed: Vec<PlacedItem> = next
            .iter()
            .map(|index| PlacedItem {
                index,
                position: position_of(index, &self.size_model, &self.layout),
                entering: animate
                    && !exiting
                    && (all_entering || prev.is_none_or(|p| !p.contains(index))),
            })
            .collect();

        let animation = if !animate {
            AnimationState::Idle
        } else if exiting {
            AnimationState::Exiting
        } else if placed.iter().any(|p| p.entering) {
            AnimationState::Entering
        } else {
            AnimationState::Idle
        };

        vtrace!(
            start = next.start_index,
            end = next.end_index,
            ?reason,
            "render effect"
        );
        RenderEffect::new(
            next,
            placed,
            animation,
            self.extent(),
            self.scroll_to.take(),
            reason,
            Arc::clone(&self.collection),
        )
    }
}

impl<T> core::fmt::Debug for ScrollWindowController<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollWindowController")
            .field("state", &self.state)
            .field("count", &self.collection.len())
            .field("viewport", &self.viewport)
            .field("layout", &self.layout)
            .field("range", &self.range)
            .field("measured", &self.measured)
            .field("transitioning", &self.transition.is_some())
            .finish_non_exhaustive()
    }
}
