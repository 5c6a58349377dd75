// src/consts.rs
//! Shared constants: envelope layout, key source and file template defaults

/// Length of a raw vault key (XChaCha20-Poly1305, 256 bit)
pub const KEY_LEN: usize = 32;

/// Length of the random XChaCha20 nonce stored at the front of the header
pub const NONCE_LEN: usize = 24;

/// Length of the Poly1305 authentication tag stored after the nonce
pub const TAG_LEN: usize = 16;

/// Fixed envelope header: `nonce ‖ tag`
pub const HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

/// Shortest hex payload that can hold a full header
pub const MIN_HEX_LEN: usize = HEADER_LEN * 2;

/// Domain-separation tag bound into every envelope as associated data
pub const CONTEXT: &[u8; 8] = b"SCRVAULT";

/// Environment variable holding the hex-encoded key
pub const DEFAULT_KEY_ENV: &str = "SCRIPT_VAULT_HEX_KEY";

/// Environment variable pointing at the TOML config file
pub const CONFIG_ENV: &str = "SCRIPT_VAULT_CONFIG";

/// Config file looked up in the working directory when `CONFIG_ENV` is unset
pub const DEFAULT_CONFIG_FILE: &str = "script-vault.toml";

/// Prefix of staged files; six random characters follow (`.vault.XXXXXX`)
pub const TEMP_PREFIX: &str = ".vault.";
pub const TEMP_RAND_LEN: usize = 6;

/// Heredoc delimiter closing the payload in the default template
pub const PAYLOAD_DELIMITER: &str = "SCRIPT_VAULT";

/// Default stub written before the hex payload
///
/// The payload travels as a heredoc on fd 3 rather than as an argument, so
/// its size is not bounded by the kernel's per-argument limit and the user's
/// stdin still reaches the script.
pub const DEFAULT_PREAMBLE: &str = "#!/bin/sh\nexec script-vault run @/dev/fd/3 3<<'SCRIPT_VAULT'\n";

/// Default text written after the hex payload
pub const DEFAULT_POSTAMBLE: &str = "\nSCRIPT_VAULT\n";

/// `run` argument meaning "read the payload from stdin"
pub const STDIN_PAYLOAD: &str = "-";

/// `run` argument prefix meaning "read the payload from this path"
pub const FILE_PAYLOAD_PREFIX: char = '@';

/// Interpreter that receives decrypted source
pub const DEFAULT_INTERPRETER: &str = "sh";

/// Descriptor the default interpreter reads its script from (0 means stdin)
pub const DEFAULT_SOURCE_FD: i32 = 3;

/// Argument naming `DEFAULT_SOURCE_FD` to the default interpreter
pub const DEFAULT_SOURCE_ARG: &str = "/dev/fd/3";
