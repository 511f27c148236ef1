//! Browser globals: `console` and the modal dialogs.

use crate::code::Code;
use crate::literal::Literal;

/// `console.*` calls. Arguments go through the literal serializer.
pub struct Console;

macro_rules! console_with_arg {
    ($($(#[$meta:meta])* $name:ident => $js:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(arg: impl Into<Literal>) -> Code {
                Console::call($js, Some(arg.into()))
            }
        )*
    };
}

macro_rules! console_without_arg {
    ($($name:ident => $js:literal),* $(,)?) => {
        $(
            pub fn $name() -> Code {
                Console::call($js, None)
            }
        )*
    };
}

impl Console {
    /// `console.<method>(<arg>)`; an absent argument leaves the call empty.
    pub fn call(method: &str, arg: Option<Literal>) -> Code {
        let arg = arg.as_ref().map(Literal::to_source).unwrap_or_default();
        Code::new(format!("console.{}({})", method, arg))
    }

    console_with_arg! {
        assert => "assert",
        dir => "dir",
        dirxml => "dirxml",
        error => "error",
        log => "log",
        table => "table",
        time => "time",
        time_end => "timeEnd",
        time_stamp => "timeStamp",
        warn => "warn",
    }

    console_without_arg! {
        clear => "clear",
        count => "count",
        group => "group",
        group_collapsed => "groupCollapsed",
        group_end => "groupEnd",
        info => "info",
        profile => "profile",
        profile_end => "profileEnd",
        trace => "trace",
    }

    /// Same as [`Console::log`].
    pub fn debug(arg: impl Into<Literal>) -> Code {
        Self::log(arg)
    }
}

/// Modal dialogs.
pub struct Util;

impl Util {
    /// `alert(<literal>)`
    pub fn alert(obj: impl Into<Literal>) -> Code {
        Code::new(format!("alert({})", obj.into().to_source()))
    }

    /// `confirm(<literal>)`
    pub fn confirm(text: impl Into<Literal>) -> Code {
        Code::new(format!("confirm({})", text.into().to_source()))
    }
}
