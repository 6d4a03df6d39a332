//! # CLI Module
//!
//! The rendering surface of the application. It starts the authorization
//! flow on the user's behalf, shows progress while the handshake and the fetch
//! are in flight, and prints the resulting track list.
//!
//! ## Commands
//!
//! - [`tracks`] - connect with Spotify and list the top tracks (or the tracks of
//!   a fixed album) as a table or as JSON
//!
//! ## Output
//!
//! Table rows show the position, a cover marker (`■` when the track has a cover
//! image, `□` for the placeholder), title, artists, album and duration. Missing
//! fields are printed as empty cells.
//!
//! ## Example Usage
//!
//! ```bash
//! toptracks tracks                          # top tracks, medium term
//! toptracks tracks --time-range short-term  # last four weeks
//! toptracks tracks --album 4aawyAB9vmqN3uQ7FjRGTy
//! toptracks tracks --json > tracks.json
//! ```

mod tracks;

pub use tracks::Output;
pub use tracks::table_rows;
pub use tracks::tracks;
