// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{mirror, polar_fold, rotate_about};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_creation() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
    }

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(a + b, Vec2::new(5.0, 7.0));
        assert_eq!(a.dot(b), 14.0);
    }
}
