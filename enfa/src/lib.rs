#![warn(missing_docs)]

//! Epsilon-NFA toolkit: epsilon-closure, epsilon elimination and a
//! step-by-step acceptance simulator.
//!
//! Everything works on an immutable [`Automaton`] value. [`convert`] reads one
//! and returns a new, epsilon-free automaton plus its closure table; a
//! [`Simulation`] borrows one and walks an input string through it, keeping a
//! history of active state sets so it can step back exactly.
//!
//! ```
//! use enfa::{Automaton, Simulation, convert};
//!
//! let sample = Automaton::sample();
//! let conversion = convert(&sample);
//! assert_eq!(conversion.converted.final_states().len(), 3);
//!
//! let mut sim = Simulation::new(&sample, "0");
//! sim.step_forward().unwrap();
//! assert!(sim.is_accepted());
//! ```

pub mod closure;
pub mod convert;
pub mod edit;
pub mod error;
pub mod model;
pub mod simulate;
pub mod table;

pub use closure::{ClosureTable, closure_table, epsilon_closure};
pub use convert::{Conversion, convert};
pub use error::{EditError, ImportError, Issue, SimulationError};
pub use model::{Automaton, EPSILON, State, Symbol, Transition};
pub use simulate::{Simulation, accepts};
pub use table::{Row, TransitionMap};
