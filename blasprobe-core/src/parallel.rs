//! Scoped-thread helpers used by the accelerated routines.
//!
//! Uses `std::thread::scope`: no runtime, no pool, threads join before return.

/// Splits `[start, end)` into at most `threads` chunks and collects one result per chunk.
#[inline]
pub fn parallel_map_chunks<F, R>(threads: usize, start: usize, end: usize, f: F) -> Vec<R>
where
    F: Fn(usize, usize) -> R + Sync + Send + Copy,
    R: Send,
{
    if start >= end {
        return Vec::new();
    }
    let threads = threads.max(1);
    let total = end - start;
    let chunk_size = total.div_ceil(threads);

    if total <= chunk_size || threads <= 1 {
        return vec![f(start, end)];
    }

    std::thread::scope(|s| {
        let handles: Vec<_> = (start..end)
            .step_by(chunk_size)
            .map(|chunk_start| {
                let chunk_end = (chunk_start + chunk_size).min(end);
                s.spawn(move || f(chunk_start, chunk_end))
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    })
}

/// Runs `f(line, slice)` for each of `lines` consecutive lines of stride `ld`.
///
/// Line `l` starts at `data[l * ld]`; the last slice may be shorter than `ld`.
/// Lines are handed out to at most `threads` scoped threads in contiguous groups,
/// so each thread owns a disjoint `&mut` region.
pub fn parallel_lines_mut<T, F>(threads: usize, data: &mut [T], ld: usize, lines: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if lines == 0 || ld == 0 {
        return;
    }
    let threads = threads.max(1).min(lines);
    if threads == 1 {
        for (line, chunk) in data.chunks_mut(ld).take(lines).enumerate() {
            f(line, chunk);
        }
        return;
    }

    let per_thread = lines.div_ceil(threads);
    let f = &f;
    std::thread::scope(|s| {
        for (group, region) in data.chunks_mut(per_thread * ld).enumerate() {
            let first = group * per_thread;
            if first >= lines {
                break;
            }
            let count = per_thread.min(lines - first);
            s.spawn(move || {
                for (i, chunk) in region.chunks_mut(ld).take(count).enumerate() {
                    f(first + i, chunk);
                }
            });
        }
    });
}

/// Worker count when the caller does not pin one.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_chunks() {
        let results = parallel_map_chunks(4, 0, 100, |start, end| (start..end).sum::<usize>());
        let total: usize = results.iter().sum();
        assert_eq!(total, (0..100).sum::<usize>());
        assert!(results.len() <= 4);
    }

    #[test]
    fn test_empty_range() {
        assert!(parallel_map_chunks(4, 5, 5, |_, _| 1).is_empty());
    }

    #[test]
    fn test_lines_each_visited_once() {
        let ld = 5;
        let lines = 7;
        let mut data = vec![0usize; (lines - 1) * ld + 3];
        parallel_lines_mut(3, &mut data, ld, lines, |line, chunk| {
            for v in chunk.iter_mut().take(3) {
                *v += line + 1;
            }
        });
        for line in 0..lines {
            for j in 0..3 {
                assert_eq!(data[line * ld + j], line + 1);
            }
        }
        // padding between lines untouched
        assert_eq!(data[3], 0);
        assert_eq!(data[4], 0);
    }

    #[test]
    fn test_lines_single_thread_matches() {
        let mut a = vec![0u32; 20];
        let mut b = vec![0u32; 20];
        let f = |line: usize, chunk: &mut [u32]| chunk[0] = line as u32 * 10;
        parallel_lines_mut(1, &mut a, 4, 5, f);
        parallel_lines_mut(8, &mut b, 4, 5, f);
        assert_eq!(a, b);
    }
}
