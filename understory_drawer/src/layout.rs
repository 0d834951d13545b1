// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer container.

use alloc::vec::Vec;
use core::hash::Hash;
use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

use crate::aggregator::{MotionAggregator, MotionState, scrim_opacity};
use crate::config::LayoutConfig;
use crate::error::DrawerError;
use crate::listener::DrawerListener;
use crate::pointer::PointerId;
use crate::registry::{DrawerId, DrawerRegistry};
use crate::resolver::{DragResolver, DrawerSpec, ResolverState};
use crate::settle::{EaseOutSettle, SettleDriver};
use crate::state::Boundary;

/// A container hosting any number of edge-anchored drawers.
///
/// The host feeds it pointer events and animation ticks; the layout moves the
/// drawers, keeps at most one of them open and reports what happened to its
/// [`DrawerListener`].
///
/// - `K` identifies drawer surfaces in the host's view tree (the same key the host's
///   hit testing yields for a pointer-down).
/// - `L` receives notifications.
/// - `D` is the per-drawer settle animation; each drawer gets its own instance.
///
/// At most one drawer is reported open at any time. A drawer that comes to rest open
/// while another drawer is still reported open (because it has not finished closing)
/// is reported open once the other one has closed.
///
/// ```rust
/// use core::time::Duration;
/// use kurbo::{Point, Size, Vec2};
/// use understory_drawer::{DrawerEvent, DrawerLayout, DrawerSpec, Edge, LayoutConfig};
/// use understory_drawer::pointer::PointerId;
///
/// let mut layout: DrawerLayout<&str, Vec<DrawerEvent>> =
///     DrawerLayout::new(Size::new(1000.0, 800.0), LayoutConfig::default(), Vec::new());
/// let nav = layout
///     .register("nav", DrawerSpec::new(Edge::Left, Size::new(300.0, 800.0), 20.0))
///     .unwrap();
///
/// // Grab the handle and pull the drawer most of the way out.
/// let finger = PointerId(1);
/// assert!(layout.pointer_down(finger, Some(&"nav"), Point::new(10.0, 400.0)));
/// layout.pointer_move(finger, Point::new(240.0, 400.0));
/// layout.pointer_up(finger, Vec2::ZERO);
///
/// // Run the settle animation to completion.
/// while layout.tick(Duration::from_millis(16)) {}
/// assert!(layout.is_open(nav).unwrap());
/// assert!(layout.listener().contains(&DrawerEvent::Opened(nav)));
/// ```
#[derive(Debug)]
pub struct DrawerLayout<K, L, D = EaseOutSettle> {
    registry: DrawerRegistry<K, DragResolver<K, D>>,
    aggregator: MotionAggregator,
    config: LayoutConfig,
    container: Size,
    listener: L,
    // Drawers resting open whose opened notification waits for another drawer to close.
    deferred: Vec<DrawerId>,
    // Drawers that came to rest during the current frame or layout pass.
    finished: Vec<DrawerId>,
}

impl<K, L, D> DrawerLayout<K, L, D>
where
    K: Clone + Eq + Hash,
    L: DrawerListener,
    D: SettleDriver + Default,
{
    /// Registers a drawer for `surface`, using a default settle driver.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::DuplicateDrawer`] if `surface` is already registered.
    pub fn register(&mut self, surface: K, spec: DrawerSpec) -> Result<DrawerId, DrawerError> {
        self.register_with_driver(surface, spec, D::default())
    }
}

impl<K, L, D> DrawerLayout<K, L, D>
where
    K: Clone + Eq + Hash,
    L: DrawerListener,
    D: SettleDriver,
{
    /// Creates an empty container of the given size.
    #[must_use]
    pub fn new(container: Size, config: LayoutConfig, listener: L) -> Self {
        Self {
            registry: DrawerRegistry::new(),
            aggregator: MotionAggregator::new(),
            config,
            container,
            listener,
            deferred: Vec::new(),
            finished: Vec::new(),
        }
    }

    /// Registers a drawer for `surface` with its own settle driver.
    ///
    /// The drawer starts closed and idle.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::DuplicateDrawer`] if `surface` is already registered;
    /// nothing changes in that case.
    pub fn register_with_driver(
        &mut self,
        surface: K,
        spec: DrawerSpec,
        driver: D,
    ) -> Result<DrawerId, DrawerError> {
        if let Some(existing) = self.registry.id_of(&surface) {
            return Err(DrawerError::DuplicateDrawer { existing });
        }
        let resolver = DragResolver::new(surface.clone(), spec, self.container, driver);
        #[cfg(feature = "tracing")]
        if resolver.drag_range(self.container) <= 0.0 {
            tracing::warn!(edge = ?spec.edge, "drawer has a zero drag range");
        }
        let id = self.registry.register(surface, resolver)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, edge = ?spec.edge, "drawer registered");
        Ok(id)
    }

    /// Removes a drawer. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: DrawerId) -> bool {
        if self.registry.unregister(id).is_none() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, "drawer unregistered");
        self.deferred.retain(|&d| d != id);
        self.refresh();
        true
    }

    /// The listener receiving notifications.
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// The container configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current container size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Number of registered drawers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no drawers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Looks up the drawer registered for `surface`.
    #[must_use]
    pub fn drawer_for(&self, surface: &K) -> Option<DrawerId> {
        self.registry.id_of(surface)
    }

    /// Iterates over registered drawers. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (DrawerId, &DragResolver<K, D>)> + '_ {
        self.registry.iter()
    }

    /// Returns a drawer's resolver.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn resolver(&self, id: DrawerId) -> Result<&DragResolver<K, D>, DrawerError> {
        self.registry.get(id).ok_or(DrawerError::UnknownDrawer(id))
    }

    /// A drawer's offset in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn offset(&self, id: DrawerId) -> Result<f64, DrawerError> {
        Ok(self.resolver(id)?.visual().offset)
    }

    /// Whether the drawer was last reported open.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn is_open(&self, id: DrawerId) -> Result<bool, DrawerError> {
        Ok(self.resolver(id)?.visual().known_open)
    }

    /// A drawer's top-left position in container coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn position(&self, id: DrawerId) -> Result<Point, DrawerError> {
        Ok(self.resolver(id)?.position())
    }

    /// A drawer's bounds in container coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn drawer_rect(&self, id: DrawerId) -> Result<Rect, DrawerError> {
        Ok(self.resolver(id)?.rect())
    }

    /// A drawer's own motion state.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn helper_state(&self, id: DrawerId) -> Result<MotionState, DrawerError> {
        Ok(self.resolver(id)?.motion_state())
    }

    /// Distance a drawer travels between closed and open.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles and
    /// [`DrawerError::DegenerateGeometry`] when the range is zero.
    pub fn drag_range(&self, id: DrawerId) -> Result<f64, DrawerError> {
        let range = self.resolver(id)?.drag_range(self.container);
        if range > 0.0 {
            Ok(range)
        } else {
            Err(DrawerError::DegenerateGeometry(id))
        }
    }

    /// Where a drawer's edge shadow of the given size sits.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn shadow_rect(&self, id: DrawerId, shadow: Size) -> Result<Rect, DrawerError> {
        Ok(self.resolver(id)?.shadow_rect(self.container, shadow))
    }

    /// The consolidated motion state.
    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        self.aggregator.state()
    }

    /// Opacity of the scrim: the largest offset of any drawer.
    #[must_use]
    pub fn scrim_opacity(&self) -> f64 {
        scrim_opacity(self.registry.iter().map(|(_, r)| r.visual().offset))
    }

    /// The configured scrim color with its alpha scaled by [`Self::scrim_opacity`].
    #[must_use]
    pub fn scrim_color(&self) -> Color {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "opacity is in [0, 1], f32 precision is plenty"
        )]
        let opacity = self.scrim_opacity() as f32;
        self.config.scrim_color.multiply_alpha(opacity)
    }

    /// Called when the container is attached to a window: every drawer starts closing.
    pub fn attach(&mut self) {
        self.close_all_drawers();
    }

    /// Applies a new container size to every drawer.
    ///
    /// Drawers that are settling keep heading for the same rest position in the new
    /// geometry.
    pub fn set_container_size(&mut self, container: Size) {
        let old = self.container;
        self.container = container;
        let mut finished = core::mem::take(&mut self.finished);
        finished.clear();
        for (id, r) in self.registry.iter_mut() {
            let was_settling = r.state() == ResolverState::Settling;
            if let Some(offset) = r.apply_layout(r.size(), old, container) {
                self.listener.on_drawer_slide(id, offset);
            }
            if was_settling && r.state() == ResolverState::Idle {
                finished.push(id);
            }
        }
        self.finish_all(finished);
    }

    /// Applies a new layout size to one drawer, keeping its offset and open status.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn layout_drawer(&mut self, id: DrawerId, size: Size) -> Result<(), DrawerError> {
        let container = self.container;
        let r = self
            .registry
            .get_mut(id)
            .ok_or(DrawerError::UnknownDrawer(id))?;
        let was_settling = r.state() == ResolverState::Settling;
        if let Some(offset) = r.apply_layout(size, container, container) {
            self.listener.on_drawer_slide(id, offset);
        }
        if was_settling {
            self.settle_if_idle(id);
        }
        self.refresh();
        Ok(())
    }

    /// Offers a pointer-down to every drawer.
    ///
    /// `target` is the surface under the pointer as found by the host's hit testing.
    /// Returns `true` if a drawer captured the pointer. Capturing a drawer closes
    /// every other drawer before the container reports the new motion state.
    pub fn pointer_down(&mut self, pointer: PointerId, target: Option<&K>, pos: Point) -> bool {
        let Some(target) = target else {
            return false;
        };
        let mut captured = None;
        for (id, r) in self.registry.iter_mut() {
            if r.try_capture(target, pointer, pos) {
                captured = Some(id);
            }
        }
        let Some(id) = captured else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, ?pointer, "drawer captured");
        if let Some(r) = self.registry.get_mut(id) {
            r.on_captured();
        }
        self.close_other_drawers(id);
        self.refresh();
        true
    }

    /// Feeds a pointer movement to the drawer held by `pointer`.
    ///
    /// Returns `true` if a drawer moved.
    pub fn pointer_move(&mut self, pointer: PointerId, pos: Point) -> bool {
        let container = self.container;
        let mut moved = false;
        for (id, r) in self.registry.iter_mut() {
            if let Some(offset) = r.drag(pointer, pos, container) {
                self.listener.on_drawer_slide(id, offset);
                moved = true;
            }
        }
        self.refresh();
        moved
    }

    /// Releases the drawer held by `pointer` with the given release velocity.
    ///
    /// Returns `true` if a drawer was released.
    pub fn pointer_up(&mut self, pointer: PointerId, velocity: Vec2) -> bool {
        let Some(id) = self.grabbed_by(pointer) else {
            return false;
        };
        let container = self.container;
        let threshold = self.config.fling_threshold();
        if let Some(r) = self.registry.get_mut(id) {
            let _target = r.on_released(velocity, threshold, container);
            #[cfg(feature = "tracing")]
            tracing::debug!(?id, ?velocity, target = ?_target, "drawer released");
        }
        self.settle_if_idle(id);
        self.refresh();
        true
    }

    /// Cancels the gesture of `pointer`; its drawer settles as if released at rest.
    ///
    /// Returns `true` if a drawer was held by `pointer`.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> bool {
        let Some(id) = self.grabbed_by(pointer) else {
            return false;
        };
        let container = self.container;
        let threshold = self.config.fling_threshold();
        if let Some(r) = self.registry.get_mut(id) {
            r.cancel(threshold, container);
        }
        self.settle_if_idle(id);
        self.refresh();
        true
    }

    /// Opens a drawer with animation, closing every other drawer.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn open_drawer(&mut self, id: DrawerId) -> Result<(), DrawerError> {
        if !self.registry.is_alive(id) {
            return Err(DrawerError::UnknownDrawer(id));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, "opening drawer");
        self.close_other_drawers(id);
        let container = self.container;
        if let Some(r) = self.registry.get_mut(id) {
            r.open(container);
        }
        self.settle_if_idle(id);
        self.refresh();
        Ok(())
    }

    /// Closes a drawer with animation.
    ///
    /// # Errors
    ///
    /// Returns [`DrawerError::UnknownDrawer`] for unregistered handles.
    pub fn close_drawer(&mut self, id: DrawerId) -> Result<(), DrawerError> {
        if !self.registry.is_alive(id) {
            return Err(DrawerError::UnknownDrawer(id));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, "closing drawer");
        self.close_one(id);
        self.refresh();
        Ok(())
    }

    /// Closes every drawer with animation.
    pub fn close_all_drawers(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("closing all drawers");
        for id in self.registry.ids() {
            self.close_one(id);
        }
        self.refresh();
    }

    /// Advances every settle animation by one frame.
    ///
    /// All drawer positions are updated before any drawer is checked for having come
    /// to rest, and the consolidated state is recomputed last. Returns `true` while
    /// another frame is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let container = self.container;
        let mut finished = core::mem::take(&mut self.finished);
        finished.clear();
        for (id, r) in self.registry.iter_mut() {
            let advance = r.advance(dt, container);
            if let Some(offset) = advance.slide {
                self.listener.on_drawer_slide(id, offset);
            }
            if advance.finished {
                finished.push(id);
            }
        }
        self.finish_all(finished);
        !self.deferred.is_empty()
            || self
                .registry
                .iter()
                .any(|(_, r)| r.state() == ResolverState::Settling)
    }

    // Runs the idle transition for every drawer in `finished`, then hands the
    // buffer back for the next pass.
    fn finish_all(&mut self, finished: Vec<DrawerId>) {
        for &id in &finished {
            #[cfg(feature = "tracing")]
            tracing::trace!(?id, "drawer settled");
            self.transition_to_idle(id);
        }
        self.finished = finished;
        self.refresh();
    }

    fn grabbed_by(&self, pointer: PointerId) -> Option<DrawerId> {
        self.registry
            .iter()
            .find(|(_, r)| r.grabbed_by() == Some(pointer))
            .map(|(id, _)| id)
    }

    fn close_other_drawers(&mut self, keep: DrawerId) {
        for id in self.registry.ids() {
            if id != keep {
                self.close_one(id);
            }
        }
    }

    fn close_one(&mut self, id: DrawerId) {
        let container = self.container;
        let Some(r) = self.registry.get_mut(id) else {
            return;
        };
        if r.is_closing(container) {
            return;
        }
        let was_idle = r.state() == ResolverState::Idle;
        r.close(container);
        if !was_idle {
            self.settle_if_idle(id);
        }
    }

    // Runs the boundary check for a drawer whose request completed without animating.
    fn settle_if_idle(&mut self, id: DrawerId) {
        if self
            .registry
            .get(id)
            .is_some_and(|r| r.state() == ResolverState::Idle)
        {
            self.transition_to_idle(id);
        }
    }

    fn transition_to_idle(&mut self, id: DrawerId) {
        let container = self.container;
        let Some(r) = self.registry.get(id) else {
            return;
        };
        let boundary = r.boundary(container);
        if boundary == Some(Boundary::Open)
            && !r.visual().known_open
            && self.reported_open_other_than(id)
        {
            #[cfg(feature = "tracing")]
            tracing::trace!(?id, "opened notification deferred");
            if !self.deferred.contains(&id) {
                self.deferred.push(id);
            }
            return;
        }
        let Some(r) = self.registry.get_mut(id) else {
            return;
        };
        self.aggregator
            .on_transition_to_idle(id, boundary, r.visual_mut(), &mut self.listener);
    }

    fn reported_open_other_than(&self, id: DrawerId) -> bool {
        self.registry
            .iter()
            .any(|(other, r)| other != id && r.visual().known_open)
    }

    // Retries deferred opened notifications, then recomputes the consolidated state.
    fn refresh(&mut self) {
        // Drawers that started moving again drop out; their own settle re-checks them.
        for id in core::mem::take(&mut self.deferred) {
            self.settle_if_idle(id);
        }
        self.aggregator.recompute(
            self.registry.iter().map(|(_, r)| r.motion_state()),
            &mut self.listener,
        );
    }
}
