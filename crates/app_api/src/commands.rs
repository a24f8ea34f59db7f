use serde_json::{Value, json};

const OPTION_INTEGER: u8 = 4;

/// Slash commands to register with the chat platform.
pub fn command_definitions() -> Value {
    json!([
        {
            "name": "ping",
            "description": "Test if the bot is responding",
        },
        {
            "name": "bloodlevel",
            "description": "Check current city blood level",
        },
        {
            "name": "setblood",
            "description": "Set city blood level (Admin only)",
            "options": [
                {
                    "name": "amount",
                    "description": "Blood level amount",
                    "type": OPTION_INTEGER,
                    "required": true,
                    "min_value": 0,
                }
            ],
        },
        {
            "name": "bloodhistory",
            "description": "View recent blood consumption history",
        },
    ])
}
