//! Reference texts
//!
//! Static guidance printed by `inkprof tips` and `inkprof reference`.

/// Tips on improving the accuracy of a profile.
pub const TIPS: &str = "\
────────────────────────────────────────────────────────────────
Tips on how to improve accuracy of a profile
────────────────────────────────────────────────────────────────

  1. The top-most lines in the file '*_sanity_check.txt', created
     after a profile is made, are the patches with highest ΔE values.

  2. If ΔE values are too large it is recommended to remeasure.
      - ΔE > 2 is regarded as clearly visible difference and
        should be remeasured (depending on printer type, see
        the quick reference table from 'inkprof reference').
      - ΔE < 1 is considered visually indistinguishable.

  3. The 'Largest ΔE' or 'max.' value is an indicator that some
     patches should be remeasured.

  4. When wanting to remeasure patches to improve overall profile
     quality, do the following:
      a. Open file '*_sanity_check.txt' of a created printer
         profile and identify which sheets have largest error.
         Look at patch ID and find column label on target chart.
      b. Re-read only those strips where high error has been
         identified, into a fresh .ti3 file.
         Press 'f' to move forward, or 'b' to move back one strip
         at a time while reading.
      c. When you have read the appropriate target strips, select
         'd' to save and exit.
      d. Open the created .ti3 file, and also the original .ti3
         for your profile to be improved.
         The new .ti3 file has data for read patches below the tag
         'BEGIN_DATA', and contains only the lines you re-read.
      e. In the original .ti3 file, search for the patch IDs to
         identify the lines to replace.
         Copy one data line at a time from the new .ti3 file, and
         replace the line with same ID in the original .ti3 file.
         Then save the file.
      f. Run 'inkprof profile' on the updated .ti3 file. A new
         .icc profile and sanity report is created. Study results
         and see if the profile is improved.

────────────────────────────────────────────────────────────────
";

/// ΔE2000 accuracy quick-reference table.
pub const DE_REFERENCE: &str = "\
Delta E 2000 (Real-World Accuracy After Profiling)
──────────────────────────────────────────────────────────────────────────────
                             Typical       Typical          Typical
Printer Class                ΔE2000        Substrates       Use Cases
──────────────────────────────────────────────────────────────────────────────
Professional Photo Inkjet    Avg 0.5-1.5   Gloss,           Gallery,
  Example Models:            95% 1.5-2.5   baryta,          contract proofing
  Epson P700/P900/P9570,     Max 3-5       fine art
  Canon PRO-1000, HP Z9+

Prosumer / High-End Inkjet   Avg 0.8-2.0   Premium gloss,   Serious hobby,
  Example Models:            95% 2.0-3.5   semi-gloss,      small studio
  Epson P600/P800,           Max 4-7
  Canon PRO-200/300

Consumer Home Inkjet         Avg 1.5-3.0   Glossy, matte,   Casual photo,
  Example Models:            95% 3.0-5.0   plain            mixed docs
  Canon PIXMA TS/MG,         Max 6-10
  Epson EcoTank/Expression

Professional Laser /         Avg 1.5-2.5   Coated stock,    Corporate,
Production                   95% 3.0-4.0   proof paper      marketing,
  Example Models:            Max 5-7                        light proof
  Xerox PrimeLink,
  Canon imagePRESS
  Ricoh Pro C

Office / Consumer Laser      Avg 2.5-5.0   Office bond,     Business docs,
  Example Models:            95% 4.0-7.0   coated office    presentations
  HP Color LaserJet Pro,     Max 7-12+
  Brother HL/MFC
  Canon i-SENSYS

──────────────────────────────────────────────────────────────────────────────

Notes:
   - Values assume proper ICC profiling and correct media settings
   - Avg = overall accuracy, 95% = typical worst case, Max = outliers
   - Lower ΔE = higher color accuracy
   - ΔE < 1.0 is generally considered visually indistinguishable
";
