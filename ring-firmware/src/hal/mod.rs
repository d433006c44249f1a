// Hardware Abstraction Layer (HAL) Module
//
// Kapselt den Strip-Zugriff hinter dem RingWriter-Trait aus ring-core.

pub mod ring_writer;

pub use ring_writer::RmtRingWriter;
