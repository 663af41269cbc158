mod logging_env;

use crate::driver::NexStarTelescope;
use crate::mount::{Mount, Precision, Simulator};
use crate::protocol::DEFAULT_TIMEOUT;

/// Telescope driver wired to a fresh simulator.
///
/// The simulator handle shares state with the one inside the driver, so tests can
/// inspect the commands that reached the "hardware".
pub(crate) fn simulated_telescope(precision: Precision) -> (NexStarTelescope, Simulator) {
    let simulator = Simulator::default();
    (telescope_on(&simulator, precision), simulator)
}

/// Telescope driver talking to a clone of `simulator`.
pub(crate) fn telescope_on(simulator: &Simulator, precision: Precision) -> NexStarTelescope {
    NexStarTelescope::new(Mount::new(simulator.clone(), DEFAULT_TIMEOUT, precision))
}
