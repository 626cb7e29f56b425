//! Symbolic channel names.
//!
//! Every button and LED is referred to by a [`Channel`].  The configuration
//! file binds each channel name to a GPIO pin (`PIN_MAPPING`) and to a slot
//! of the mode vector (`MODE_MAPPING`).

/// All seven hardware channels, in mode-vector declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    RedButton = 0,
    YellowButton = 1,
    GreenButton = 2,
    RedLed = 3,
    YellowLed = 4,
    GreenLed = 5,
    BellButton = 6,
}

impl Channel {
    pub const COUNT: usize = 7;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::RedButton,
        Channel::YellowButton,
        Channel::GreenButton,
        Channel::RedLed,
        Channel::YellowLed,
        Channel::GreenLed,
        Channel::BellButton,
    ];

    /// Configuration key for this channel.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RedButton => "RED_BUTTON",
            Self::YellowButton => "YELLOW_BUTTON",
            Self::GreenButton => "GREEN_BUTTON",
            Self::RedLed => "RED_LED",
            Self::YellowLed => "YELLOW_LED",
            Self::GreenLed => "GREEN_LED",
            Self::BellButton => "BELL_BUTTON",
        }
    }
}

/// The four physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Red,
    Yellow,
    Green,
    Bell,
}

impl ButtonId {
    pub const ALL: [ButtonId; 4] = [ButtonId::Red, ButtonId::Yellow, ButtonId::Green, ButtonId::Bell];

    pub const fn channel(self) -> Channel {
        match self {
            Self::Red => Channel::RedButton,
            Self::Yellow => Channel::YellowButton,
            Self::Green => Channel::GreenButton,
            Self::Bell => Channel::BellButton,
        }
    }
}

/// The three status LEDs.
///
/// [`LedChannel::ALL`] is the fixed order in which the arbiter pushes
/// changes to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedChannel {
    Red,
    Yellow,
    Green,
}

impl LedChannel {
    pub const ALL: [LedChannel; 3] = [LedChannel::Red, LedChannel::Yellow, LedChannel::Green];

    pub const fn channel(self) -> Channel {
        match self {
            Self::Red => Channel::RedLed,
            Self::Yellow => Channel::YellowLed,
            Self::Green => Channel::GreenLed,
        }
    }
}
