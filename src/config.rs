pub trait ConfigT: Sized {
    const DEBUG: bool;
    const CHECK_INVARIANTS: bool; // validate the whole tree after every mutation
}

/// Logs through the tree's debug writer, or stderr if it has none. Expects a
/// type parameter named `Config: ConfigT` in scope.
#[macro_export]
macro_rules! debug {
    ($writer:expr, $($arg:tt)+) => {
        if Config::DEBUG {
            match $writer {
                Some(ref w) => {
                    use std::fmt::Write as _;
                    let _ = writeln!(w.borrow_mut(), $($arg)+);
                }
                None => {
                    eprintln!($($arg)+);
                }
            }
        }
    };

    ($($arg:tt)+) => {
        if Config::DEBUG {
            eprintln!($($arg)+);
        }
    };
}

pub struct DefaultConfig {}
pub struct DebugConfig {}

impl ConfigT for DefaultConfig {
    const DEBUG: bool = false;
    const CHECK_INVARIANTS: bool = false;
}

impl ConfigT for DebugConfig {
    const DEBUG: bool = true;
    const CHECK_INVARIANTS: bool = true;
}
