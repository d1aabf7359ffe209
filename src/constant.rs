/// names of built-in commands
pub mod commands {
    pub const MEMBERCOUNT: &str = "membercount";
}

/// Discord message flags
pub mod flags {
    /// Opts a message into layout-component rendering
    pub const IS_COMPONENTS_V2: u64 = 1 << 15;
}

/// Discord interaction callback types
pub mod callback {
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
}

/// Discord's upper bound for a single member listing request
pub const MEMBERS_PER_REQUEST: u64 = 1000;
