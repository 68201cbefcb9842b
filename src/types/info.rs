use super::expr::Expr;

/// A native function call found in a rule: the callee's name and the printed
/// form of each argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInfo {
    pub name: String,
    pub args: Vec<String>,
}

/// Inventory of the names and literals a rule refers to, in source order.
///
/// Built by [`CompiledRule::info()`](crate::CompiledRule::info). Call arguments
/// are recorded on their [`CallInfo`] only, never in the other lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleInfo {
    identifiers: Vec<String>,
    lists: Vec<String>,
    regexes: Vec<String>,
    numbers: Vec<f64>,
    strings: Vec<String>,
    calls: Vec<CallInfo>,
}

impl RuleInfo {
    pub(crate) fn collect(expr: Option<&Expr>) -> Self {
        let mut info = Self::default();
        if let Some(expr) = expr {
            info.visit(expr);
        }
        info
    }

    fn visit(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier { name, .. } => self.identifiers.push(name.clone()),
            Expr::ListReference { name, .. } => self.lists.push(name.clone()),
            Expr::Regex { pattern, .. } => self.regexes.push(pattern.clone()),
            Expr::Number { value, .. } => self.numbers.push(*value),
            Expr::String { value, .. } => self.strings.push(value.clone()),
            Expr::Boolean { .. } => {}
            Expr::Prefix { right, .. } => self.visit(right),
            Expr::Infix { left, right, .. } => {
                self.visit(left);
                self.visit(right);
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => self.calls.push(CallInfo {
                name: function.to_string(),
                args: arguments.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// List names, without the `@` prefix.
    #[must_use]
    pub fn lists(&self) -> &[String] {
        &self.lists
    }

    #[must_use]
    pub fn regexes(&self) -> &[String] {
        &self.regexes
    }

    #[must_use]
    pub fn numbers(&self) -> &[f64] {
        &self.numbers
    }

    #[must_use]
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    #[must_use]
    pub fn calls(&self) -> &[CallInfo] {
        &self.calls
    }

    /// Every binding name the host must supply for the rule to resolve:
    /// identifiers and list names, sorted and de-duplicated.
    #[must_use]
    pub fn required_bindings(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .identifiers
            .iter()
            .chain(&self.lists)
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
