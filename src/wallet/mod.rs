//! Wallet module - adapters, registry, and the session.
//!
//! # Architecture
//!
//! ```text
//! WalletSession (source of truth: adapter + address + network)
//!     │
//!     ├── connect(id) ───→ WalletRegistry ───→ WalletAdapter
//!     │                                            │
//!     ├── sign_and_submit(tx) ────────────────────┤
//!     │                                            ▼
//!     │                                        Provider (injected global)
//!     │
//!     └── adapter id ───→ KeyStorage ("wallet.adapter", restored at startup)
//! ```
//!
//! # Adapters
//!
//! | Adapter | Availability | Signing |
//! |---------|--------------|---------|
//! | Crossmark | extension global present | sign-and-submit |
//! | Gem | extension global present | sign-and-submit |
//! | Xaman | always (deep-link flow) | not implemented |

mod adapter;
mod crossmark;
mod gem;
mod registry;
mod session;
mod xaman;

pub use adapter::{AdapterId, Connected, Submitted, WalletAdapter, WalletError};
pub use crossmark::CrossmarkAdapter;
pub use gem::GemAdapter;
pub use registry::WalletRegistry;
pub use session::{RestoreOutcome, SessionSnapshot, SessionState, WalletSession, ADAPTER_KEY};
pub use xaman::XamanAdapter;
