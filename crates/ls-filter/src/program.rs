use crate::FilterFn;

/// One multiply-add: `target[target] += source[source] * weight`.
///
/// Indices are relative to the start of a row. The source index is signed so
/// that programs built without rejection can refer to samples past either
/// edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MadInstruction {
    pub target: u32,
    pub source: i32,
    pub weight: f32,
}

/// Flat list of multiply-add instructions for one axis of a resize.
///
/// Instructions for a given target sample are contiguous and target samples
/// appear in ascending order. The same program is applied to every row.
#[derive(Debug, Clone, PartialEq)]
pub struct MadProgram {
    instructions: Vec<MadInstruction>,
    channels: usize,
}

impl Default for MadProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl MadProgram {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            channels: 1,
        }
    }

    /// Empties the program while keeping its allocation.
    pub fn clear(&mut self) {
        self.instructions.clear();
        self.channels = 1;
    }

    pub fn instructions(&self) -> &[MadInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Channel count the indices are laid out for.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Appends instructions that resample a row of `nsource` samples into
    /// `ntarget` samples.
    ///
    /// `left` and `right` select the part of the source row that maps onto
    /// the target, in normalized coordinates. `radius_multiplier` widens
    /// (`> 1`) or narrows (`< 1`) the kernel support without changing its
    /// shape.
    ///
    /// Weights for each target sample are normalized to sum to one. A target
    /// sample whose candidates were all rejected, or whose weights sum to
    /// zero, receives no instructions. An empty or inverted region
    /// (`right <= left`) yields no instructions at all.
    pub fn generate(
        &mut self,
        ntarget: usize,
        nsource: usize,
        left: f32,
        right: f32,
        filter: &FilterFn,
        radius_multiplier: f32,
    ) {
        debug_assert_eq!(self.channels, 1, "cannot append to an expanded program");
        let span = right - left;
        if ntarget == 0 || nsource == 0 || !(span > 0.0) {
            return;
        }

        let fntarget = ntarget as f32;
        let fnsource = nsource as f32;
        let dtarget = 1.0 / fntarget;
        let region_samples = fnsource * span;
        let minifying = fntarget < region_samples;
        let extent = if minifying { fntarget } else { region_samples };
        let domain_scale = extent / radius_multiplier;

        // Half-width of the kernel support in region units. Candidates farther
        // than this from the target center are known to weigh zero.
        let filter_bounds = filter.bounding_radius.abs() / domain_scale;
        let last_source = nsource as i64 - 1;

        // Target centers advance by `dtarget` from `dtarget / 2`.
        let mut next_xtarget = dtarget / 2.0;
        for itarget in 0..ntarget {
            let xtarget = next_xtarget;
            next_xtarget += dtarget;

            // Covers the kernel's full support around the target, in source pixels.
            let center = left + xtarget * span;
            let half_width = filter_bounds * span;
            let mut lower = ((center - half_width) * fnsource).floor() as i64;
            let mut upper = ((center + half_width) * fnsource).ceil() as i64;
            if filter.reject_external {
                lower = lower.max(0);
                upper = upper.min(last_source);
            }

            let start = self.instructions.len();
            let mut sum = 0.0f32;
            for isource in lower..=upper {
                let xsource = ((isource as f32 + 0.5) / fnsource - left) / span;
                if filter.reject_external {
                    let outside_image = isource < 0 || isource > last_source;
                    let outside_range = !(0.0..1.0).contains(&xsource);
                    if outside_image || outside_range {
                        continue;
                    }
                }

                let t = domain_scale * (xsource - xtarget).abs();
                let weight = filter.eval(t);
                if weight != 0.0 {
                    self.instructions.push(MadInstruction {
                        target: itarget as u32,
                        source: isource as i32,
                        weight,
                    });
                    sum += weight;
                }
            }

            if sum == 0.0 {
                self.instructions.truncate(start);
                continue;
            }
            for mad in &mut self.instructions[start..] {
                mad.weight /= sum;
            }
        }

        log::trace!(
            "generated {} instructions for {nsource} -> {ntarget} over [{left}, {right}]",
            self.instructions.len()
        );
    }

    /// Rewrites a single-channel program for interleaved `nchannels` data.
    ///
    /// Every instruction is replicated once per channel with both indices
    /// scaled by `nchannels` and offset by the channel number. Must be called
    /// at most once per generated program.
    pub fn expand(&mut self, nchannels: usize) {
        assert!(nchannels > 0, "channel count must be > 0");
        assert_eq!(self.channels, 1, "program is already expanded");
        if nchannels == 1 {
            return;
        }

        let n = nchannels as u32;
        let mut result = Vec::with_capacity(self.instructions.len() * nchannels);
        for mad in &self.instructions {
            let target = mad.target * n;
            let source = mad.source * n as i32;
            for c in 0..n {
                result.push(MadInstruction {
                    target: target + c,
                    source: source + c as i32,
                    weight: mad.weight,
                });
            }
        }
        self.instructions = result;
        self.channels = nchannels;
    }
}
