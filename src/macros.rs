/// Implements the common value traits of three-component structs.
///
/// The first form provides `Default`, `Clone`, `Copy`, `Debug`, `PartialEq` and scaling
/// by a scalar. The second form additionally provides lossless conversions from and
/// into [`Vector3`](crate::types::Vector3).
#[macro_export]
macro_rules! impl_vector_traits {
    ($type_name:ident, $x:ident, $y:ident, $z:ident) => {
        impl<T> Copy for $type_name<T> where T: Copy {}

        impl<T> Clone for $type_name<T>
        where
            T: Clone,
        {
            fn clone(&self) -> Self {
                Self {
                    $x: self.$x.clone(),
                    $y: self.$y.clone(),
                    $z: self.$z.clone(),
                }
            }
        }

        impl<T> Default for $type_name<T>
        where
            T: Default,
        {
            #[inline]
            fn default() -> Self {
                Self {
                    $x: Default::default(),
                    $y: Default::default(),
                    $z: Default::default(),
                }
            }
        }

        impl<T> core::fmt::Debug for $type_name<T>
        where
            T: core::fmt::Debug,
        {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($type_name))
                    .field(&self.$x)
                    .field(&self.$y)
                    .field(&self.$z)
                    .finish()
            }
        }

        impl<T> PartialEq for $type_name<T>
        where
            T: PartialEq,
        {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.$x == other.$x && self.$y == other.$y && self.$z == other.$z
            }
        }

        impl<T> core::ops::Mul<T> for $type_name<T>
        where
            T: core::ops::Mul<T, Output = T> + Clone,
        {
            type Output = $type_name<T>;

            #[inline]
            fn mul(self, rhs: T) -> Self::Output {
                Self {
                    $x: self.$x * rhs.clone(),
                    $y: self.$y * rhs.clone(),
                    $z: self.$z * rhs,
                }
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:lower>] {
                use super::*;

                #[test]
                fn test_len() {
                    let value = $type_name::<f32>::default();
                    assert_eq!(value.len(), 3);
                }

                #[test]
                fn test_index() {
                    let value = $type_name::<f32>::new(1.0, 2.0, 3.0);
                    assert_eq!(value[0], 1.0);
                    assert_eq!(value[1], 2.0);
                    assert_eq!(value[2], 3.0);
                }

                #[test]
                fn test_scale() {
                    let value = $type_name::<f32>::new(1.0, -2.0, 3.0) * 2.0;
                    assert_eq!(value, $type_name::new(2.0, -4.0, 6.0));
                }
            }
        }
    };

    ($type_name:ident, $x:ident, $y:ident, $z:ident, vector) => {
        $crate::impl_vector_traits!($type_name, $x, $y, $z);

        impl<T> From<$type_name<T>> for $crate::types::Vector3<T> {
            #[inline]
            fn from(value: $type_name<T>) -> Self {
                $crate::types::Vector3::new(value.$x, value.$y, value.$z)
            }
        }

        impl<T> From<&$type_name<T>> for $crate::types::Vector3<T>
        where
            T: Clone,
        {
            #[inline]
            fn from(value: &$type_name<T>) -> Self {
                $crate::types::Vector3::new(value.$x.clone(), value.$y.clone(), value.$z.clone())
            }
        }

        impl<T> From<$crate::types::Vector3<T>> for $type_name<T> {
            #[inline]
            fn from(value: $crate::types::Vector3<T>) -> Self {
                Self::new(value.x, value.y, value.z)
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:lower _vector>] {
                use super::*;

                #[test]
                fn test_into_vector3() {
                    let value = $type_name::<f64>::new(0.5, 1.5, -2.5);
                    let vector: $crate::types::Vector3<f64> = (&value).into();
                    assert_eq!(vector, $crate::types::Vector3::new(0.5, 1.5, -2.5));
                    assert_eq!($type_name::from(vector), value);
                }
            }
        }
    };
}
