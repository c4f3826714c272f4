//! Events that trigger lifecycle transitions

/// Fault level a transport failure pushes a ready device into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Degradation {
    /// Peripheral must be brought up again (`Error`)
    Hardware,
    /// Peripheral is still configured (`RuntimeError`)
    Runtime,
}

/// Events that can trigger lifecycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// `init()` requested
    Init,
    /// `reset()` requested
    Reset,
    /// `shutdown()` requested
    Shutdown,
    /// A transfer or bring-up hook failed
    TransportFault(Degradation),
}
