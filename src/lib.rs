/*
Line terminal for hosts that cannot block.

Output side
    Program writes arbitrary byte chunks
    Decode through VTE so split code points survive chunk boundaries
    Only whole lines reach the display, the rest waits for the next chunk

Input side
    Keys edit one line, walk history, or submit
    Submit echoes, then builds argv with the program name first
    Program wants stdin => no real read, flag it instead
        next submitted line is glued onto the previous command and the program is run again

Host
    Session owns display + decoder + editor, nothing global
    Terminal host: crossterm for keys and drawing, program runs in a PTY
*/
mod display;
mod edit;
mod editor;
mod history;
mod keymap;
mod output;
mod pty;
mod session;
mod tty;
mod vte_actions;

pub use display::{Display, Transcript};
pub use edit::{EditBuffer, EditOp};
pub use editor::{EditorState, LineEditor};
pub use history::History;
pub use keymap::{command_for, Command};
pub use output::OutputDecoder;
pub use pty::PtyInvoker;
pub use session::{Program, ProgramIo, Session, SessionConfig};
pub use tty::{RawMode, TtyDisplay};
