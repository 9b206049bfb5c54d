#[cfg(test)]
pub(crate) mod test;

pub mod dna {

    const fn comp_base_impl(base: u8) -> u8 {
        match base {
            b'A' => b'T',
            b'G' => b'C',
            b'C' => b'G',
            b'T' => b'A',
            b'a' => b't',
            b'g' => b'c',
            b'c' => b'g',
            b't' => b'a',
            _ => b'N',
        }
    }

    // loops can be used in const fns since Rust 1.46, meaning we can
    // build a lookup table at compile time
    const fn comp_base_table() -> [u8; 256] {
        let mut i = 0;
        let mut table: [u8; 256] = [0; 256];
        while i <= 255 {
            table[i] = comp_base_impl(i as u8);
            i += 1;
        }
        table
    }

    const DNA_COMP_TABLE: [u8; 256] = comp_base_table();

    /// Retrieves the DNA complement for the provided base using a
    /// lookup-table built at compile time using the `const fn`
    /// `comp_base_table()`.
    #[inline]
    pub const fn comp_base(base: u8) -> u8 {
        DNA_COMP_TABLE[base as usize]
    }

    /// Calculates the reverse complement for a sequence provided as a
    /// double-ended iterator. Collects into a `Vec<u8>` for
    /// convenience.
    #[inline]
    pub fn rev_comp<I, B>(seq: I) -> Vec<u8>
    where
        B: std::borrow::Borrow<u8>,
        I: IntoIterator<Item = B>,
        I::IntoIter: DoubleEndedIterator,
    {
        seq.into_iter()
            .rev()
            .map(|b| comp_base(*b.borrow()))
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use quickcheck::quickcheck;

        const BASES: &[u8] = b"ACGTacgt";

        fn to_bases(seq: &[u8]) -> Vec<u8> {
            seq.iter().map(|b| BASES[*b as usize % BASES.len()]).collect()
        }

        #[test]
        fn rev_comp_of_known_sequence() {
            assert_eq!(rev_comp(b"ACCTGN"), b"NCAGGT".to_vec());
            assert_eq!(rev_comp(b"gatc"), b"gatc".to_vec());
        }

        quickcheck! {
            fn prop_comp_is_involution(seq: Vec<u8>) -> bool {
                to_bases(&seq)
                    .into_iter()
                    .all(|b| comp_base(comp_base(b)) == b)
            }

            fn prop_rev_comp_is_involution(seq: Vec<u8>) -> bool {
                let seq = to_bases(&seq);
                rev_comp(rev_comp(&seq)) == seq
            }
        }
    }
}
