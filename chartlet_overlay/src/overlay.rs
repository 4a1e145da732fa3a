// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::atomic::{AtomicU64, Ordering};

use chartlet_view::{ObserverId, Observers};
use peniko::Color;

use crate::center::CenterMarker;
use crate::scale_bar::ScaleBar;

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique overlay identity.
///
/// The id is assigned at construction and survives moves between and within
/// collections, so observers can track an overlay across reorderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(u64);

impl OverlayId {
    fn next() -> Self {
        Self(NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// The shared overlay field changed by a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayProperty {
    /// [`Overlay::set_name`]
    Name,
    /// [`Overlay::set_enabled`]
    Enabled,
    /// [`Overlay::set_opacity`]
    Opacity,
    /// [`Overlay::set_foreground`]
    Foreground,
    /// [`Overlay::set_background`]
    Background,
    /// [`Overlay::set_tag`]
    Tag,
}

/// The overlay variants this library knows how to lay out.
#[derive(Debug)]
pub enum OverlayKind {
    /// Crosshair marking the viewport center.
    Center(CenterMarker),
    /// Graduated distance bar.
    ScaleBar(ScaleBar),
}

/// A screen-space decoration drawn above the map layers.
///
/// Every overlay carries the same capability record (name, enabled flag,
/// opacity, foreground/background color, and an optional tag) plus its
/// variant payload. Mutating a shared field notifies the overlay's
/// observers synchronously with the [`OverlayProperty`] identity of the
/// change; equal-value assignments are no-ops.
#[derive(Debug)]
pub struct Overlay {
    id: OverlayId,
    name: String,
    enabled: bool,
    opacity: f64,
    foreground: Color,
    background: Color,
    tag: Option<String>,
    kind: OverlayKind,
    observers: Observers<OverlayProperty>,
}

impl Overlay {
    /// Creates an overlay with the given name and payload.
    ///
    /// Overlays start enabled and fully opaque, with black foreground on
    /// white background.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: OverlayKind) -> Self {
        Self {
            id: OverlayId::next(),
            name: name.into(),
            enabled: true,
            opacity: 1.0,
            foreground: Color::BLACK,
            background: Color::WHITE,
            tag: None,
            kind,
            observers: Observers::new(),
        }
    }

    /// Creates a center-crosshair overlay with default marker geometry.
    #[must_use]
    pub fn center() -> Self {
        Self::new("center", OverlayKind::Center(CenterMarker::default()))
    }

    /// Creates a scale-bar overlay with default configuration.
    #[must_use]
    pub fn scale_bar() -> Self {
        Self::new("scale-bar", OverlayKind::ScaleBar(ScaleBar::new()))
    }

    /// This overlay's process-unique id.
    #[must_use]
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// The overlay name, used for lookup in collections.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the overlay.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name != name {
            self.name = name;
            self.observers.notify(OverlayProperty::Name);
        }
    }

    /// Whether the overlay is rendered.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables rendering.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.observers.notify(OverlayProperty::Enabled);
        }
    }

    /// Overlay opacity in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Sets the opacity.
    pub fn set_opacity(&mut self, opacity: f64) {
        if self.opacity != opacity {
            self.opacity = opacity;
            self.observers.notify(OverlayProperty::Opacity);
        }
    }

    /// Foreground (stroke and text) color.
    #[must_use]
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Sets the foreground color.
    pub fn set_foreground(&mut self, color: Color) {
        if self.foreground != color {
            self.foreground = color;
            self.observers.notify(OverlayProperty::Foreground);
        }
    }

    /// Background (halo) color, drawn under the foreground for visibility.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Sets the background color.
    pub fn set_background(&mut self, color: Color) {
        if self.background != color {
            self.background = color;
            self.observers.notify(OverlayProperty::Background);
        }
    }

    /// The free-form tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Sets or clears the tag.
    pub fn set_tag(&mut self, tag: Option<String>) {
        if self.tag != tag {
            self.tag = tag;
            self.observers.notify(OverlayProperty::Tag);
        }
    }

    /// The variant payload.
    #[must_use]
    pub fn kind(&self) -> &OverlayKind {
        &self.kind
    }

    /// Mutable access to the variant payload.
    ///
    /// Payload mutation is tracked by the payload itself (the scale bar's
    /// redraw flag), not by [`OverlayProperty`] notifications.
    pub fn kind_mut(&mut self) -> &mut OverlayKind {
        &mut self.kind
    }

    /// The scale-bar payload, if this is a scale-bar overlay.
    #[must_use]
    pub fn scale_bar(&self) -> Option<&ScaleBar> {
        match &self.kind {
            OverlayKind::ScaleBar(scale_bar) => Some(scale_bar),
            OverlayKind::Center(_) => None,
        }
    }

    /// Mutable scale-bar payload, if this is a scale-bar overlay.
    pub fn scale_bar_mut(&mut self) -> Option<&mut ScaleBar> {
        match &mut self.kind {
            OverlayKind::ScaleBar(scale_bar) => Some(scale_bar),
            OverlayKind::Center(_) => None,
        }
    }

    /// Registers a property-changed observer.
    pub fn on_change(&mut self, callback: impl FnMut(OverlayProperty) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Removes a property-changed observer.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}
