//! Interactive editing tools.
//!
//! ## Decal Manager
//!
//! - **Purpose**: Place image decals on scene surfaces and edit them in place
//! - **Workflow**:
//!   1. Load an image from the panel (file dialog or configured URL)
//!   2. Left click a surface to place it; the new decal is selected
//!   3. Scroll to resize, Ctrl + drag to move, Delete to remove
//! - **Features**:
//!   - Outline highlight with constant world-space border width
//!   - OBB picking of decals in front of surfaces
//!   - Snapshot export of the current view
//!
//! ## Cross-Platform Considerations
//!
//! Native builds get the side panel and the file dialog. WASM builds keep
//! mouse and keyboard editing; images come from the startup config only.

/// Decal placement, selection and editing with a native side panel.
pub mod decal_manager;
