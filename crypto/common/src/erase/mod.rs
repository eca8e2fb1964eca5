//! Overwriting secrets (sponge states, matrix blocks, key bytes) with zeros
//! in a way the compiler will not elide.

#![allow(clippy::module_name_repetitions)]

#[inline(always)]
fn atomic_fence() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
}

#[inline(always)]
fn volatile_write<T: Copy + Sized>(src: T, dst: &mut T) {
    unsafe { core::ptr::write_volatile(dst, src) }
}

pub trait Erase {
    fn erase(&mut self);
}

/// Marker for types whose `Drop` erases their secret contents.
pub trait EraseOnDrop {}

trait DefaultIsErased: Copy + Default + Sized {}

impl<E: DefaultIsErased> Erase for E {
    fn erase(&mut self) {
        volatile_write(E::default(), self);
        atomic_fence();
    }
}

macro_rules! impl_default_is_erased {
    ($($t:ty),*) => {
        $(
            impl DefaultIsErased for $t {}
        )*
    };
}

impl_default_is_erased!(u8, u32, u64, usize);

impl<E: Erase, const N: usize> Erase for [E; N] {
    fn erase(&mut self) {
        self.iter_mut().erase();
    }
}

impl<E: EraseOnDrop, const N: usize> EraseOnDrop for [E; N] {}

impl<E: Erase> Erase for core::slice::IterMut<'_, E> {
    fn erase(&mut self) {
        for elem in self {
            elem.erase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_are_zeroed() {
        let mut block = [[0xdead_beef_u64; 12]; 4];
        block.erase();
        assert_eq!(block, [[0; 12]; 4]);
    }

    #[test]
    fn slices_are_zeroed_through_iter_mut() {
        let mut bytes = [0xffu8; 33];
        bytes[..17].iter_mut().erase();
        assert!(bytes[..17].iter().all(|&b| b == 0));
        assert!(bytes[17..].iter().all(|&b| b == 0xff));
    }
}
