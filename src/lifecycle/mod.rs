//! Process lifecycle: stopping the polling loop on interrupt

mod shutdown;

pub use shutdown::ShutdownSignal;
