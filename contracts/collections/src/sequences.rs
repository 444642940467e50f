//! Sequence contract for the standard library's ordered collections

use crate::{ContractError, Sequence};
use std::collections::{vec_deque, VecDeque};
use std::fmt;

impl<T> Sequence for Vec<T>
where
    T: PartialEq + Clone + fmt::Debug,
{
    type Item = T;
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        T: 'a;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn add(&mut self, item: T) {
        self.push(item);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        <[T]>::iter(self)
    }

    fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), ContractError> {
        ContractError::check_capacity(dest.len(), offset, self.len())?;
        dest[offset..offset + self.len()].clone_from_slice(self);
        Ok(())
    }

    fn insert(&mut self, index: usize, item: T) -> Result<(), ContractError> {
        if index > self.len() {
            return Err(ContractError::out_of_range(index, self.len()));
        }
        Vec::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T, ContractError> {
        if index >= self.len() {
            return Err(ContractError::out_of_range(index, self.len()));
        }
        Ok(Vec::remove(self, index))
    }

    fn get(&self, index: usize) -> Result<&T, ContractError> {
        <[T]>::get(self, index).ok_or_else(|| ContractError::out_of_range(index, self.len()))
    }

    fn set(&mut self, index: usize, item: T) -> Result<T, ContractError> {
        let len = self.len();
        let slot = <[T]>::get_mut(self, index)
            .ok_or_else(|| ContractError::out_of_range(index, len))?;
        Ok(std::mem::replace(slot, item))
    }
}

impl<T> Sequence for VecDeque<T>
where
    T: PartialEq + Clone + fmt::Debug,
{
    type Item = T;
    type Iter<'a>
        = vec_deque::Iter<'a, T>
    where
        T: 'a;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn add(&mut self, item: T) {
        self.push_back(item);
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<(), ContractError> {
        if index > self.len() {
            return Err(ContractError::out_of_range(index, self.len()));
        }
        VecDeque::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T, ContractError> {
        let len = self.len();
        VecDeque::remove(self, index).ok_or_else(|| ContractError::out_of_range(index, len))
    }

    fn get(&self, index: usize) -> Result<&T, ContractError> {
        VecDeque::get(self, index).ok_or_else(|| ContractError::out_of_range(index, self.len()))
    }

    fn set(&mut self, index: usize, item: T) -> Result<T, ContractError> {
        let len = self.len();
        let slot = VecDeque::get_mut(self, index)
            .ok_or_else(|| ContractError::out_of_range(index, len))?;
        Ok(std::mem::replace(slot, item))
    }
}
