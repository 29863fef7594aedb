//! Checkout states and outcomes.

use core::fmt;

use food_store_core::AddressField;

/// Where the checkout flow currently is.
///
/// ```text
/// Editing ──submit_online──▶ SubmittingOnline ──▶ Completed
///    ▲                              │
///    │◀──────── Failed ◀────────────┤
///    │                              │
///    └──submit_cod──▶ ValidatingCod ──▶ SubmittingCod ──▶ Completed
///          ▲                │                 │
///          └── rejected ◀───┘   Failed ◀──────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// The draft address is being filled in.
    #[default]
    Editing,
    /// An online-payment order is being placed.
    SubmittingOnline,
    /// The draft is being checked before a cash-on-delivery order.
    ValidatingCod,
    /// A cash-on-delivery order is being placed.
    SubmittingCod,
    /// The order was placed (or control passed to the payment page).
    Completed,
    /// The last submission failed; the flow falls back to `Editing`.
    Failed(String),
}

impl CheckoutState {
    /// Returns `true` if the draft may be edited or submitted.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Editing | Self::Failed(_))
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::SubmittingOnline => write!(f, "submitting_online"),
            Self::ValidatingCod => write!(f, "validating_cod"),
            Self::SubmittingCod => write!(f, "submitting_cod"),
            Self::Completed => write!(f, "completed"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The browser was sent to the payment processor.
    Redirected { session_url: String },
    /// A cash-on-delivery order was placed and the cart cleared.
    Placed,
    /// The draft is incomplete; nothing was sent.
    Incomplete(AddressField),
    /// The store refused the order or could not be reached.
    Failed(String),
    /// The flow was not in an editable state.
    Busy,
}

impl CheckoutOutcome {
    /// Returns `true` if an order was placed or handed to the payment page.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Redirected { .. } | Self::Placed)
    }
}
