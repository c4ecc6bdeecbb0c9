use crate::expr::*;

/// Renders an expression tree as a fully-parenthesized prefix list, one
/// rule per node kind. Leaves (literals, variables, `this`, `super`) print
/// bare; everything else prints as `(head child ...)` with single spaces.
pub fn print(expr: &Expr) -> String {
    match expr {
        Expr::Assign { name, value } => {
            let mut builder = String::from("(=");
            builder.push(' ');
            builder.push_str(&name.lexeme);
            builder.push(' ');
            builder.push_str(&print(value));
            builder.push(')');
            builder
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),
        Expr::Call {
            callee,
            paren: _,
            arguments,
        } => {
            let mut builder = String::from("(call");
            builder.push(' ');
            builder.push_str(&print(callee));
            for argument in arguments {
                builder.push(' ');
                builder.push_str(&print(argument));
            }
            builder.push(')');
            builder
        }
        Expr::Get { object, name } => {
            let mut builder = String::from("(get");
            builder.push(' ');
            builder.push_str(&print(object));
            builder.push(' ');
            builder.push_str(&name.lexeme);
            builder.push(')');
            builder
        }
        Expr::Grouping(inner) => parenthesize("group", &[inner.as_ref()]),
        Expr::Literal(literal) => literal.to_string(),
        Expr::Logical {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),
        // The assigned value is not part of the rendering, only the target.
        Expr::Set {
            object,
            name,
            value: _,
        } => {
            let mut builder = String::from("(set");
            builder.push(' ');
            builder.push_str(&print(object));
            builder.push(' ');
            builder.push_str(&name.lexeme);
            builder.push(')');
            builder
        }
        Expr::Super { .. } => String::from("super"),
        Expr::This { .. } => String::from("this"),
        Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[right.as_ref()]),
        Expr::Variable { name } => name.lexeme.clone(),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut builder = String::with_capacity(2 + name.len() + exprs.len() * 2);
    builder.push('(');
    builder.push_str(name);
    for expr in exprs {
        builder.push(' ');
        builder.push_str(&print(expr));
    }
    builder.push(')');
    builder
}
