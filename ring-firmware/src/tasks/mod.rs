// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig. Die Zustands-Tabelle
// gehört exklusiv dem Control-Loop; alle anderen Tasks kommunizieren
// mit ihm über Embassy Channels (Link → Control, Portal → Control,
// Control → Link).

pub mod control;
pub mod input;
pub mod link;
pub mod portal;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use control::control_task;
pub use input::input_task;
pub use link::link_task;
pub use portal::portal_task;
pub use wifi::{connection_task, dhcp_task, net_task};
