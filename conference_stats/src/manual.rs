/*!

This is the long-form manual for `conference_stats` and `confstats`.

## Input datasets

The following CSV files (UTF-8, with a header row) are understood:
* `unifiedPaperData.csv` one row per paper
* `unifiedCommitteeData.csv` one row per program committee member
* `unifiedPaperCountryData.csv`, `unifiedCommitteeCountryData.csv` the same, with the countries
* `big_companies_analysis_papers_new.csv` an older extraction of the papers with their institutions

Column names are matched with a few spellings, the first non-empty one wins:

| field        | accepted columns                                                      |
|--------------|-----------------------------------------------------------------------|
| conference   | `conference`, `Conference`                                            |
| year         | `year`, `Year`                                                        |
| continent    | `predominant_continent`, `Predominant Continent`, `continent`, `Continent` |
| institutions | `institutions`, `Institutions`                                        |
| countries    | `countries`, `Countries`                                              |

A row without conference or without a numeric year is ignored by every view.

### Conferences

Codes are upper-cased. `CLOUD` is read as `SOCC` and `IEEE CLOUD` as `IEEECLOUD`.

### Continents

`NA`, `EU`, `AS` and their long names map to North America, Europe and Asia.
Oceania, South America, Africa and the Middle East map to Other. Anything else
is not recognized: such a row still counts in the totals of the continent
distribution, but not in its buckets.

### Countries

The `countries` field is a list separated by `;` or `,`, for example
`France; Germany` or `['France', 'Germany']`. Common variants are merged
(`USA`, `U.S.A.` and `United States of America` are all `United States`),
other names are title-cased. A record listing `n` countries counts for `1/n`
in each of them.

### Institutions

The `institutions` field is a list separated by `;`. Each entry may end with
its country in parentheses: `ETH Zurich (Switzerland); Google`. Commas do not
separate institutions, since they appear in names such as
`University of California, Berkeley`. Fields separated by commas only are read
as a single institution for the rankings; the Big Tech detection is not
affected because it matches company names anywhere in the field.

## Views

### `continentDistribution`

Per conference and year, the number of rows in North America, Europe, Asia
and Others, and the total number of rows.

### `asianTrend`

Per conference and year, the percentage of rows located in Asia, among the
rows with a known continent.

### `bigTech`, `bigTechByRegion`

Per conference and year, the percentage of papers with at least one Big Tech
institution, of purely academic papers, and of papers without institutions.
The regional variant splits the Big Tech percentage by the origin of the
companies (North America, Europe, Asia). A paper with companies from several
regions is split evenly. The regional percentages always add up to the Big
Tech percentage: the rounding remainder goes to the largest region.

### `committeeVsPapers`, `countryGap`

Per conference (optionally per year, optionally within a range of years), the
percentage of committee members and of papers per continent (or country),
and the gap in percentage points: committee minus papers. A positive gap
means that the region is over-represented in the committee.

### `diversity`

Per conference, the Gini-Simpson index `1 - sum(p_i^2)` of the continents of
the committee and of the papers. 0 means that all the rows come from one
continent.

### `countryDistribution`

Per conference and year, the fractional number of rows per country.
A list of focus countries can be given: the other countries are then dropped
or grouped under `Other`. Rows without country can be reported as `Unknown`.

### `countryRanking`, `institutionRanking`

Countries or institutions sorted by their share of the total weight. Ties are
sorted by name. The institution ranking can be restricted to one country.

### `asianTrendBands`, `bigTechBands`

The mean and the population standard deviation of a series, per year across
all the conferences.

## Configuration

`confstats` reads either command line flags or a JSON file:

```text
{
  "outputSettings": { "reportName": "SOSP 2023 report", "outputPath": "report.json" },
  "dataDirectory": "data",
  "views": [
    { "view": "committeeVsPapers", "startYear": 2015, "endYear": 2023, "byYear": true },
    { "view": "countryDistribution", "focusCountries": ["USA", "China"], "includeOther": true },
    { "view": "institutionRanking", "country": "Switzerland", "top": 10 }
  ]
}
```

*/
