/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Match finders feeding the fixed huffman encoder

use alloc::vec;
use alloc::vec::Vec;

use crate::constants::{DEFLATE_MAX_MATCH_LEN, DEFLATE_MIN_MATCH_LEN, DEFLATE_WINDOW_SIZE};

/// A back-reference, `length` bytes copied from `distance` bytes back
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Match
{
    pub length:   usize,
    pub distance: usize
}

pub trait MatchFinder
{
    /// Find a match for the bytes starting at `position`, every position
    /// is visited exactly once either here or in `skip`
    fn find_match(&mut self, data: &[u8], position: usize) -> Option<Match>;

    /// Positions `start..end` were covered by an emitted match
    fn skip(&mut self, data: &[u8], start: usize, end: usize);
}

/// Number of equal bytes at `earlier` and `current`, capped at `max`
#[inline(always)]
fn match_length(data: &[u8], earlier: usize, current: usize, max: usize) -> usize
{
    let a = &data[earlier..earlier + max];
    let b = &data[current..current + max];

    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[inline(always)]
fn max_length_at(data: &[u8], position: usize) -> usize
{
    (data.len() - position).min(DEFLATE_MAX_MATCH_LEN)
}

/// Only looks at a fixed set of distances, no search at all.
///
/// For filtered scanlines the useful distances are the previous
/// pixel and the same pixel on the previous row.
pub struct RunMatcher
{
    distances: [usize; 2]
}

impl RunMatcher
{
    pub fn new(pixel_distance: usize, row_distance: usize) -> RunMatcher
    {
        RunMatcher {
            distances: [pixel_distance, row_distance]
        }
    }
}

impl MatchFinder for RunMatcher
{
    fn find_match(&mut self, data: &[u8], position: usize) -> Option<Match>
    {
        let max = max_length_at(data, position);

        if max < DEFLATE_MIN_MATCH_LEN
        {
            return None;
        }
        let mut best: Option<Match> = None;

        for distance in self.distances
        {
            if distance == 0 || distance > position || distance > DEFLATE_WINDOW_SIZE
            {
                continue;
            }
            let length = match_length(data, position - distance, position, max);

            if length >= DEFLATE_MIN_MATCH_LEN && best.map_or(true, |m| length > m.length)
            {
                best = Some(Match { length, distance });
            }
        }
        best
    }

    fn skip(&mut self, _: &[u8], _: usize, _: usize) {}
}

const HASH_BITS: usize = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;
const WINDOW_MASK: usize = DEFLATE_WINDOW_SIZE - 1;
const NIL: usize = usize::MAX;
const TOO_FAR: usize = 4096;

/// Greedy LZ77 over a hash chain of 3 byte prefixes
pub struct HashChainMatcher
{
    head:      Vec<usize>,
    prev:      Vec<usize>,
    max_chain: usize,
    nice_len:  usize
}

impl HashChainMatcher
{
    pub fn new(max_chain: usize, nice_len: usize) -> HashChainMatcher
    {
        HashChainMatcher {
            head: vec![NIL; HASH_SIZE],
            prev: vec![NIL; DEFLATE_WINDOW_SIZE],
            max_chain,
            nice_len: nice_len.min(DEFLATE_MAX_MATCH_LEN)
        }
    }

    #[inline(always)]
    fn hash(data: &[u8], position: usize) -> usize
    {
        let value = u32::from(data[position])
            | (u32::from(data[position + 1]) << 8)
            | (u32::from(data[position + 2]) << 16);

        (value.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
    }

    #[inline(always)]
    fn insert(&mut self, data: &[u8], position: usize) -> usize
    {
        let hash = Self::hash(data, position);
        let candidate = self.head[hash];

        self.prev[position & WINDOW_MASK] = candidate;
        self.head[hash] = position;

        candidate
    }
}

impl MatchFinder for HashChainMatcher
{
    fn find_match(&mut self, data: &[u8], position: usize) -> Option<Match>
    {
        let max = max_length_at(data, position);

        if max < DEFLATE_MIN_MATCH_LEN
        {
            return None;
        }
        let mut candidate = self.insert(data, position);
        let mut best = Match {
            length:   DEFLATE_MIN_MATCH_LEN - 1,
            distance: 0
        };
        let mut chain = self.max_chain;

        while candidate != NIL && chain > 0
        {
            let distance = position - candidate;

            if distance > DEFLATE_WINDOW_SIZE
            {
                break;
            }
            // cheap reject before the full compare
            if data[candidate + best.length.min(max - 1)] == data[position + best.length.min(max - 1)]
            {
                let length = match_length(data, candidate, position, max);

                if length > best.length
                {
                    best = Match { length, distance };

                    if length >= self.nice_len
                    {
                        break;
                    }
                }
            }
            let next = self.prev[candidate & WINDOW_MASK];

            // slots are reused once the window wraps, a newer entry
            // there would not be older than the candidate
            if next == NIL || next >= candidate
            {
                break;
            }
            candidate = next;
            chain -= 1;
        }

        // a far away minimum length match costs more bits than three literals
        if best.length == DEFLATE_MIN_MATCH_LEN && best.distance > TOO_FAR
        {
            return None;
        }
        (best.distance != 0).then_some(best)
    }

    fn skip(&mut self, data: &[u8], start: usize, end: usize)
    {
        let last = end.min(data.len().saturating_sub(DEFLATE_MIN_MATCH_LEN - 1));

        for position in start..last
        {
            self.insert(data, position);
        }
    }
}
