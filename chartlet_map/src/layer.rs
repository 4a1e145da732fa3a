// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::atomic::{AtomicU64, Ordering};

use kurbo::Rect;

use crate::collection::Keyed;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique layer identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A map layer as the map model sees it.
///
/// Chartlet does not fetch or hold layer data; providers, tile schemas, and
/// caching live in external collaborators. What the model needs is the
/// layer's place in the drawing order, its visibility, and its world-space
/// envelope for computing the map extent.
#[derive(Clone, Debug)]
pub struct Layer {
    id: LayerId,
    name: String,
    enabled: bool,
    opacity: f64,
    envelope: Option<Rect>,
}

impl Layer {
    /// Creates an enabled, fully opaque layer without an envelope.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            enabled: true,
            opacity: 1.0,
            envelope: None,
        }
    }

    /// Sets the world-space envelope, builder style.
    #[must_use]
    pub fn with_envelope(mut self, envelope: Rect) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// This layer's process-unique id.
    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the layer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the layer is rendered.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables rendering.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Layer opacity in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Sets the opacity.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    /// The world-space envelope, if known.
    #[must_use]
    pub fn envelope(&self) -> Option<Rect> {
        self.envelope
    }

    /// Sets or clears the world-space envelope.
    pub fn set_envelope(&mut self, envelope: Option<Rect>) {
        self.envelope = envelope;
    }
}

impl Keyed for Layer {
    type Id = LayerId;

    fn id(&self) -> LayerId {
        self.id
    }
}
