// src/config/defaults.rs
use crate::config::app::{InterpreterSettings, KeySettings, TemplateSettings};
use crate::consts::{
    DEFAULT_INTERPRETER, DEFAULT_KEY_ENV, DEFAULT_POSTAMBLE, DEFAULT_PREAMBLE, DEFAULT_SOURCE_ARG,
    DEFAULT_SOURCE_FD,
};

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_KEY_ENV.into(),
        }
    }
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        // Script on its own descriptor so the user's stdin reaches the script
        let (args, source_fd) = if cfg!(unix) {
            (vec![DEFAULT_SOURCE_ARG.into()], DEFAULT_SOURCE_FD)
        } else {
            (Vec::new(), 0)
        };
        Self {
            program: DEFAULT_INTERPRETER.into(),
            args,
            source_fd,
        }
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.into(),
            postamble: DEFAULT_POSTAMBLE.into(),
        }
    }
}
