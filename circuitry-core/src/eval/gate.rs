//! Boolean functions for gate nodes.

use crate::graph::GateOp;

impl GateOp {
    /// Apply this gate to its operands, in input order.
    ///
    /// `Not` reads only the first operand. Callers never pass an empty
    /// slice; if they do, `And` yields 1 and `Not` treats the missing
    /// operand as 0.
    pub fn apply(&self, operands: &[bool]) -> bool {
        match self {
            GateOp::And => all(operands),
            GateOp::Or => any(operands),
            GateOp::Not => !operands.first().copied().unwrap_or(false),
            GateOp::Xor => parity(operands),
            GateOp::Nand => !all(operands),
            GateOp::Nor => !any(operands),
            GateOp::Xnor => !parity(operands),
        }
    }
}

fn all(operands: &[bool]) -> bool {
    operands.iter().all(|&v| v)
}

fn any(operands: &[bool]) -> bool {
    operands.iter().any(|&v| v)
}

fn parity(operands: &[bool]) -> bool {
    operands.iter().fold(false, |acc, &v| acc ^ v)
}
