//! Link renderer port: turns connection results into visuals.

use roomlink_domain::connection::ConnectionResult;

/// A sink for resolution output.
///
/// Renderers are redrawn wholesale: every resolution pass calls
/// [`clear`](Self::clear) followed by [`draw`](Self::draw). Animation never
/// touches resolution state.
pub trait LinkRenderer {
    /// Remove every artifact drawn so far.
    fn clear(&mut self);

    /// Draw one artifact per result, in order.
    fn draw(&mut self, results: &[ConnectionResult]);

    /// Advance cosmetic animation by one display frame.
    fn animate(&mut self);
}
