//! Condition-code evaluation against PSTATE.

/// The four NZCV condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub n: bool,
    pub z: bool,
    pub c: bool,
    pub v: bool,
}

/// The 16 AArch64 condition codes, decided against [`Flags`] by the standard
/// table. `AL` and `NV` are both unconditionally true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConditionCode {
    Eq,
    Ne,
    Cs,
    Cc,
    Mi,
    Pl,
    Vs,
    Vc,
    Hi,
    Ls,
    Ge,
    Lt,
    Gt,
    Le,
    #[default]
    Al,
    Nv,
}

impl ConditionCode {
    /// Evaluates this condition against the given flags.
    pub fn eval(self, flags: Flags) -> bool {
        match self {
            Self::Eq => flags.z,
            Self::Ne => !flags.z,
            Self::Cs => flags.c,
            Self::Cc => !flags.c,
            Self::Mi => flags.n,
            Self::Pl => !flags.n,
            Self::Vs => flags.v,
            Self::Vc => !flags.v,
            Self::Hi => flags.c && !flags.z,
            Self::Ls => !flags.c || flags.z,
            Self::Ge => flags.n == flags.v,
            Self::Lt => flags.n != flags.v,
            Self::Gt => !flags.z && flags.n == flags.v,
            Self::Le => flags.z || flags.n != flags.v,
            Self::Al | Self::Nv => true,
        }
    }
}
