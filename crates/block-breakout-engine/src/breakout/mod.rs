/*!
 * # Breakout Module
 *
 * Decides what Enter does inside a block-structured document.
 *
 * ## Policy
 *
 * Every block type falls into one of three categories (see [`Classifier`]):
 *
 * - **Default**: the engine abstains and the host performs its own split
 * - **Single breakout** (headings, titles): Enter leaves the block as it is
 *   and appends an empty plain paragraph, so one keystroke never produces two
 *   consecutive headings
 * - **Double breakout** (list items, quotes): the first Enter continues the
 *   structure with a block of the same type; Enter on that block while it is
 *   still empty replaces it with a plain paragraph
 *
 * ## Statelessness
 *
 * The engine keeps no memory between key-presses. "Enter was already pressed
 * once" is read off the document: the caret sits in an empty block of a
 * double-breakout type. A [`decide_return`] call is therefore a function of the
 * classifier, the document snapshot and the selection (plus the key generator
 * for fresh block keys), and one engine can serve any number of editors.
 *
 * ## Module Structure
 *
 * - **`classifier`**: `BreakoutConfig`, configuration warnings and type lookup
 * - **`decider`**: the pure decision function and its `Decision`/`Abstention` types
 * - **`keys`**: injectable fresh-key generation
 * - **`engine`**: `BreakoutEngine` and the `HostBindings` seam to the editor
 */

pub mod classifier;
pub mod decider;
pub mod engine;
pub mod keys;

pub use classifier::{BlockCategory, BreakoutConfig, Classifier, ConfigWarning};
pub use decider::{Abstention, Decision, Edit, decide_return};
pub use engine::{BreakoutEngine, HostBindings, ReturnHandling};
pub use keys::{KeyGenerator, SequentialKeys, UuidKeys};
