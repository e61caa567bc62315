mod column;
pub use column::Column;

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{group, Expr};

mod func;
pub use func::{count, Func};

mod into_expr;
pub use into_expr::IntoExpr;

mod order;
pub use order::Order;

mod select;
pub use select::{Select, Selection};

mod update;
pub use update::Update;
