//! JMA weather code table.
//!
//! JMA forecast payloads carry three-digit code strings. Only the codes the
//! dashboard renders distinctly are mapped; anything else falls through to
//! `Condition::Default` with the payload's raw text description.

use crate::types::Condition;

/// Display mapping for a recognized JMA weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeInfo {
    pub condition: Condition,
    pub description: &'static str,
    pub emoji: &'static str,
}

/// Look up a JMA weather code. Returns `None` for unrecognized codes.
pub fn lookup(code: &str) -> Option<CodeInfo> {
    let info = match code {
        // Clear family (100s)
        "100" => CodeInfo {
            condition: Condition::Clear,
            description: "晴れ",
            emoji: "☀️",
        },
        "101" => CodeInfo {
            condition: Condition::PartlySunny,
            description: "晴れ時々曇り",
            emoji: "🌤️",
        },
        "110" => CodeInfo {
            condition: Condition::PartlySunny,
            description: "晴れのち曇り",
            emoji: "🌤️",
        },
        "200" => CodeInfo {
            condition: Condition::Clouds,
            description: "曇り",
            emoji: "☁️",
        },
        "201" => CodeInfo {
            condition: Condition::PartlyCloudy,
            description: "曇り時々晴れ",
            emoji: "⛅",
        },
        "300" => CodeInfo {
            condition: Condition::Rain,
            description: "雨",
            emoji: "🌧️",
        },
        "400" => CodeInfo {
            condition: Condition::Snow,
            description: "雪",
            emoji: "❄️",
        },
        _ => return None,
    };
    Some(info)
}
