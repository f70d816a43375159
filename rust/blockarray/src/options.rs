//! Construction options for [`Array`](crate::Array).

use blockarray_common::{Result, verify_arg};

/// How an [`Array`](crate::Array) computes its new capacity when an insertion
/// finds it full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Grow by a fixed number of slots: `new = old + bias`.
    ///
    /// Repeated single-element appends cost O(n^2) overall with this policy.
    Linear { bias: usize },
    /// Double the capacity, growing by at least `min` slots:
    /// `new = max(old * 2, old + min)`.
    Geometric { min: usize },
}

impl GrowthPolicy {
    /// Default number of slots added per growth step of the linear policy.
    pub const DEFAULT_BIAS: usize = 1;

    /// Number of slots to add to an array whose capacity is `capacity`.
    #[inline]
    pub fn grow_by(&self, capacity: usize) -> usize {
        match *self {
            GrowthPolicy::Linear { bias } => bias,
            GrowthPolicy::Geometric { min } => capacity.max(min),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            GrowthPolicy::Linear { bias } => verify_arg!(bias, bias > 0),
            GrowthPolicy::Geometric { min } => verify_arg!(min, min > 0),
        }
        Ok(())
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::Linear {
            bias: Self::DEFAULT_BIAS,
        }
    }
}

/// Options controlling the backing block and growth of an array.
///
/// Options are validated once at construction and travel with the array
/// through clones.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Alignment of the backing block in bytes. `None` selects the natural
    /// alignment of the element type.
    pub alignment: Option<usize>,
    /// Capacity growth applied when an insertion finds the array full.
    pub growth: GrowthPolicy,
}

impl ArrayOptions {
    pub fn new() -> ArrayOptions {
        Default::default()
    }

    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Block alignment used for elements of type `T`.
    #[inline]
    pub fn resolve_alignment<T>(&self) -> usize {
        self.alignment.unwrap_or(std::mem::align_of::<T>())
    }

    /// Validates the options for elements of type `T`.
    ///
    /// The alignment must be a power of two no smaller than `T`'s natural
    /// alignment.
    pub fn validate<T>(&self) -> Result<()> {
        let alignment = self.resolve_alignment::<T>();
        verify_arg!(alignment, alignment.is_power_of_two());
        verify_arg!(alignment, alignment >= std::mem::align_of::<T>());
        self.growth.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_linear_by_one() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy, GrowthPolicy::Linear { bias: 1 });
        assert_eq!(policy.grow_by(0), 1);
        assert_eq!(policy.grow_by(100), 1);
    }

    #[test]
    fn test_geometric_policy() {
        let policy = GrowthPolicy::Geometric { min: 4 };
        assert_eq!(policy.grow_by(0), 4);
        assert_eq!(policy.grow_by(3), 4);
        assert_eq!(policy.grow_by(16), 16);
    }

    #[test]
    fn test_validate() {
        assert!(ArrayOptions::new().validate::<u64>().is_ok());
        assert!(ArrayOptions::new().with_alignment(64).validate::<u64>().is_ok());
        assert!(ArrayOptions::new().with_alignment(2).validate::<u64>().is_err());
        assert!(ArrayOptions::new().with_alignment(24).validate::<u8>().is_err());
        assert!(ArrayOptions::new()
            .with_growth(GrowthPolicy::Linear { bias: 0 })
            .validate::<u8>()
            .is_err());
        assert!(ArrayOptions::new()
            .with_growth(GrowthPolicy::Geometric { min: 0 })
            .validate::<u8>()
            .is_err());
    }

    #[test]
    fn test_resolve_alignment() {
        assert_eq!(ArrayOptions::new().resolve_alignment::<u32>(), 4);
        assert_eq!(
            ArrayOptions::new().with_alignment(32).resolve_alignment::<u32>(),
            32
        );
    }
}
