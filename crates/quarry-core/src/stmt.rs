mod assignments;
pub use assignments::Assignments;

mod condition;
pub use condition::{ConditionChain, ConditionNode, Predicate};

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{Expr, ExprColumn};

mod func;
pub use func::ExprFunc;

mod insert;
pub use insert::Insert;

mod join;
pub use join::{Join, JoinKind};

mod op;
pub use op::{Comparator, Connector};

mod order_by;
pub use order_by::{Direction, NullOrdering, OrderBy, OrderByExpr};

mod query;
pub use query::{Query, SetOp};

mod returning;
pub use returning::Returning;

mod ty;
pub use ty::Type;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

mod value_enum;
pub use value_enum::ValueEnum;

mod value_record;
pub use value_record::ValueRecord;
