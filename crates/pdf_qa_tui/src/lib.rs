//! PDF Q&A terminal frontend.
//!
//! Module split:
//! - **workers**: per-manager background tasks bridging UI events to the
//!   async client (mpsc commands in, watch state snapshots out)
//! - **app**: full-screen event loop, view switching, key handling
//! - **event**: crossterm key polling
//! - **render**: frame drawing for the chat and library views

pub mod app;
pub mod event;
pub mod render;
pub mod workers;
