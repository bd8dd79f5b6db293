//! Controlled input widgets for gpui: text, password and single-choice
//! select. Each reports edits through `on_change` and leaving the field
//! through `on_blur`; the caller owns the value.

mod actions;
mod control;
mod edit_state;
mod select;
mod text_input;


use std::rc::Rc;

use gpui::{App, SharedString, Window};

pub use actions::{INPUT_KEY_CONTEXT, ensure_input_keybindings};
pub use edit_state::EditState;
pub use select::{Select, SelectOption, selected_label};
pub use text_input::{MASK_CHAR, PasswordInput, TextInput, masked_text};

pub type ChangeHandler = Rc<dyn Fn(SharedString, &mut Window, &mut App)>;
pub type BlurHandler = Rc<dyn Fn(&mut Window, &mut App)>;
pub type SubmitHandler = Rc<dyn Fn(&mut Window, &mut App)>;

pub(crate) const TEXT_COLOR: u32 = 0x212121;
pub(crate) const MUTED_COLOR: u32 = 0x757575;
pub(crate) const BORDER_COLOR: u32 = 0xbdbdbd;
pub(crate) const FOCUS_COLOR: u32 = 0x1976d2;
pub(crate) const ERROR_COLOR: u32 = 0xd32f2f;
pub(crate) const HOVER_COLOR: u32 = 0xeeeeee;
