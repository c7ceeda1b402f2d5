//! SpanSketch Render Library
//!
//! Renderer abstraction and implementations for SpanSketch boards.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{
    GridStyle, Palette, RenderContext, Renderer, RendererError, axis_ticks, clip_segment,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
