//! The standard parser steps.

mod binding;
mod group;
mod literal;
mod name;

pub use binding::{KeyStep, ReuseStep};
pub use group::{DirectAccessStep, ExpressionStep, FunctionStep, ListStep};
pub use literal::{CharStep, NumberStep, StringStep};
pub use name::{CommentStep, ParamStep, SpreadStep, VariableStep};

use std::rc::Rc;

use super::ParserStep;

/// Standard steps in priority order.
pub fn standard() -> Vec<Rc<dyn ParserStep>> {
    vec![
        Rc::new(FunctionStep),
        Rc::new(ExpressionStep),
        Rc::new(StringStep),
        Rc::new(NumberStep),
        Rc::new(KeyStep),
        Rc::new(ReuseStep),
        Rc::new(ListStep),
        Rc::new(DirectAccessStep),
        Rc::new(CharStep),
        Rc::new(SpreadStep),
        Rc::new(CommentStep),
        Rc::new(VariableStep),
    ]
}
