use super::{Formatter, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Value::List(values) => {
                fmt!(f, "(");
                let mut s = "";
                for value in values {
                    fmt!(f, s value);
                    s = ", ";
                }
                fmt!(f, ")");
            }
            stmt::Value::Record(_) => panic!("record values are not serialized directly"),
            value => {
                let placeholder = f.params.push(value);
                placeholder.to_sql(f);
            }
        }
    }
}
